use super::*;

/// Renders every `{md}` tag as a list holding another `{md}` tag.
struct Recursive {
    depths: Vec<usize>,
}

impl Substitutor for Recursive {
    fn substitute(
        &mut self,
        doc: &mut Document,
        body: &mut Vec<Block>,
        mut reentry: Reentry<'_>,
    ) -> Result<()> {
        self.depths.push(reentry.depth());
        while let Some(at) = find_tag(body, "{md}") {
            reentry.convert(doc, body, at, "- {md}", &MarkdownArgs::default(), self)?;
        }
        Ok(())
    }
}

/// Replaces `{name}` tags with a fixed markdown fragment.
struct Nested;

impl Substitutor for Nested {
    fn substitute(
        &mut self,
        doc: &mut Document,
        body: &mut Vec<Block>,
        mut reentry: Reentry<'_>,
    ) -> Result<()> {
        while let Some(at) = find_tag(body, "{name}") {
            let at = isolate_tag(body, at, "{name}");
            reentry.convert(doc, body, at, "*Ada* and **Grace**", &MarkdownArgs::default(), self)?;
        }
        Ok(())
    }
}

/// Fails without a specific error kind.
struct Failing;

impl Substitutor for Failing {
    fn substitute(&mut self, _: &mut Document, _: &mut Vec<Block>, _: Reentry<'_>) -> Result<()> {
        Err("unknown variable `who`".into())
    }
}

fn run(text: &str, substitutor: &mut dyn Substitutor) -> (Document, Result<usize>) {
    init_logger();
    let mut doc = host_doc();
    let converter = MarkdownConverter::new(RenderOptions::default()).unwrap();
    let res = converter.convert(
        &mut doc,
        InsertionPoint::new(0, 0),
        text,
        &MarkdownArgs::default(),
        substitutor,
        &mut MediaImages,
    );
    (doc, res)
}

#[test]
fn test_nested_markdown() {
    let (doc, res) = run("Dear {name},\n\n- hello", &mut Nested);
    res.unwrap();

    insta::assert_snapshot!(outline(&doc.body), @r#"
    p: "Dear " i"Ada" " and " b"Grace" ","
    p
    p[style=ListBullet num=1:0]: "hello"
    "#);
}

#[test]
fn test_nesting_limit() {
    let mut recursive = Recursive { depths: Vec::new() };
    let (doc, res) = run("{md}", &mut recursive);

    let err = res.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestingExceeded);
    assert_eq!(recursive.depths, vec![1, 2, 3]);

    // the document body is untouched, the list definitions of completed
    // levels stay
    assert_eq!(outline(&doc.body), "p: \"{md}\"\n");
    assert_eq!(doc.numbering.abstracts.len(), 1);
    assert_eq!(doc.numbering.abstracts[0].levels.len(), 1);
}

#[test]
fn test_substitution_failure() {
    let (doc, res) = run("Hello {who}", &mut Failing);

    let err = res.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SubstitutionFailure);
    assert_eq!(
        err.to_string(),
        "failed to substitute rendered markdown: unknown variable `who`"
    );
    assert_eq!(doc.body.len(), 1);
}
