//! Splicing rendered blocks into a host paragraph

use crate::Result;
use crate::dom::{Block, Paragraph, ParagraphProps, RunProps};

/// The host run a markdown fragment replaces: the run at index `run` of the
/// paragraph at index `block` of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
    /// Index of the host paragraph in the body.
    pub block: usize,
    /// Index of the host run in the paragraph.
    pub run: usize,
}

impl InsertionPoint {
    /// Creates an insertion point.
    pub fn new(block: usize, run: usize) -> Self {
        Self { block, run }
    }
}

fn host_paragraph(body: &[Block], at: InsertionPoint) -> Result<&Paragraph> {
    let para = body
        .get(at.block)
        .and_then(Block::as_paragraph)
        .ok_or_else(|| format!("block {} is not a paragraph", at.block))?;
    if at.run >= para.children.len() {
        return Err(format!("paragraph {} has no run {}", at.block, at.run).into());
    }
    Ok(para)
}

/// The formatting of the host run, inherited by every rendered run.
pub(crate) fn host_run_props(body: &[Block], at: InsertionPoint) -> Result<RunProps> {
    let para = host_paragraph(body, at)?;
    Ok(para.children[at.run].props.clone())
}

/// Replaces the host run with `rendered`, returning the number of blocks
/// that now take the place of the host paragraph.
///
/// The runs before and after the host run are kept. The first rendered
/// paragraph continues the runs before, the last one is continued by the runs
/// after. A single rendered paragraph joins both sides.
pub(crate) fn splice(body: &mut Vec<Block>, at: InsertionPoint, rendered: Vec<Block>) -> Result<usize> {
    host_paragraph(body, at)?;
    let Paragraph {
        props: host_props,
        mut children,
    } = body
        .get_mut(at.block)
        .and_then(Block::as_paragraph_mut)
        .map(std::mem::take)
        .unwrap_or_default();
    body.remove(at.block);

    let after_runs = children.split_off(at.run + 1);
    children.truncate(at.run);
    let mut before = Some(Paragraph {
        props: host_props.clone(),
        children,
    });
    let mut after = Some(Paragraph {
        props: host_props.clone(),
        children: after_runs,
    });

    let last = rendered.len().saturating_sub(1);
    let mut out = Vec::with_capacity(rendered.len() + 2);
    if !matches!(rendered.first(), Some(Block::Paragraph(..))) {
        out.extend(before.take().filter(|p| !p.is_empty()).map(Block::from));
    }

    for (i, block) in rendered.into_iter().enumerate() {
        let Block::Paragraph(mut para) = block else {
            out.push(block);
            continue;
        };
        if i == 0
            && let Some(before) = before.take()
        {
            para = join_head(before, para);
        }
        if i == last
            && let Some(after) = after.take()
        {
            para = join_tail(para, after, i == 0);
        }
        out.push(para.into());
    }

    out.extend(after.take().filter(|p| !p.is_empty()).map(Block::from));
    if out.is_empty() {
        out.push(
            Paragraph {
                props: host_props,
                children: Vec::new(),
            }
            .into(),
        );
    }

    let count = out.len();
    let rest = body.split_off(at.block);
    body.extend(out);
    body.extend(rest);
    Ok(count)
}

/// Appends the runs of `para` to `before`. The paragraph keeps its list
/// style and numbering.
fn join_head(before: Paragraph, para: Paragraph) -> Paragraph {
    if before.is_empty() {
        return para;
    }
    let Paragraph {
        mut props,
        mut children,
    } = before;
    carry(&mut props, &para.props);
    children.extend(para.children);
    Paragraph { props, children }
}

/// Prepends the runs of `para` to `after`. A paragraph that was already
/// joined with the runs before keeps its properties.
fn join_tail(mut para: Paragraph, after: Paragraph, joined: bool) -> Paragraph {
    if after.is_empty() {
        return para;
    }
    if !joined {
        para.props = after.props;
    }
    para.children.extend(after.children);
    para
}

fn carry(props: &mut ParagraphProps, from: &ParagraphProps) {
    if from.style.is_some() {
        props.style.clone_from(&from.style);
    }
    if from.numbering.is_some() {
        props.numbering = from.numbering;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Run, Table, outline};

    fn host() -> Vec<Block> {
        vec![
            Paragraph::new()
                .style("Body")
                .add_run(Run::text("Dear "))
                .add_run(Run::text("{md}"))
                .add_run(Run::text(", thanks."))
                .into(),
        ]
    }

    #[test]
    fn single_paragraph_joins_both_sides() {
        let mut body = host();
        let rendered = vec![Paragraph::new().add_run(Run::text("friend")).into()];
        let count = splice(&mut body, InsertionPoint::new(0, 1), rendered).unwrap();

        assert_eq!(count, 1);
        insta::assert_snapshot!(outline(&body), @r#"p[style=Body]: "Dear " "friend" ", thanks.""#);
    }

    #[test]
    fn blocks_between_both_sides() {
        let mut body = host();
        let rendered = vec![
            Paragraph::new().style("Heading1").add_run(Run::text("Title")).into(),
            Paragraph::new().add_run(Run::text("middle")).into(),
            Paragraph::new().add_run(Run::text("end")).into(),
        ];
        let count = splice(&mut body, InsertionPoint::new(0, 1), rendered).unwrap();

        assert_eq!(count, 3);
        insta::assert_snapshot!(outline(&body), @r#"
        p[style=Heading1]: "Dear " "Title"
        p: "middle"
        p[style=Body]: "end" ", thanks."
        "#);
    }

    #[test]
    fn empty_sides_are_dropped() {
        let mut body = vec![Paragraph::new().add_run(Run::text("{md}")).into()];
        let rendered = vec![Table::default().into()];
        let count = splice(&mut body, InsertionPoint::new(0, 0), rendered).unwrap();

        assert_eq!(count, 1);
        assert!(matches!(body[0], Block::Table(..)));
    }

    #[test]
    fn never_removes_everything() {
        let mut body = vec![Paragraph::new().add_run(Run::text("{md}")).into()];
        splice(&mut body, InsertionPoint::new(0, 0), Vec::new()).unwrap();
        assert_eq!(body, vec![Block::Paragraph(Paragraph::new())]);
    }

    #[test]
    fn rejects_missing_run() {
        let mut body = host();
        assert!(splice(&mut body, InsertionPoint::new(0, 3), Vec::new()).is_err());
        assert!(splice(&mut body, InsertionPoint::new(1, 0), Vec::new()).is_err());
    }
}
