//! List rendering

use log::{trace, warn};

use super::{Position, RenderContext};
use crate::Result;
use crate::ast::List;
use crate::common::ListKind;
use crate::dom::Paragraph;

/// The deepest numbering level a paragraph may reference.
const MAX_LEVEL: usize = 8;

/// Where the renderer is inside nested lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ListState {
    /// Number of enclosing lists.
    pub depth: usize,
    /// The index among directly nested lists of the same kind. It selects the
    /// numbering level.
    pub level: usize,
    /// The kind of the innermost list.
    pub kind: Option<ListKind>,
}

impl ListState {
    /// The state inside a nested list of `kind`.
    pub fn enter(self, kind: ListKind) -> Self {
        let level = match self.kind {
            Some(parent) if parent == kind => self.level + 1,
            _ => 0,
        };
        Self {
            depth: self.depth + 1,
            level,
            kind: Some(kind),
        }
    }
}

pub(super) fn render_list(ctx: &mut RenderContext, list: &List, pos: Position) -> Result<()> {
    let kind = list.kind();
    let outer = ctx.list;
    let state = outer.enter(kind);
    let top_level = outer.depth == 0;

    let level = if state.level > MAX_LEVEL {
        warn!(
            "{kind:?} list nested {} levels deep, numbering stays at level {MAX_LEVEL}",
            state.level + 1
        );
        MAX_LEVEL
    } else {
        state.level
    };

    let factory = ctx.list_style(kind);
    factory.ensure_level(ctx.doc, level, ctx.options.list(kind))?;
    trace!("list {kind:?} at depth {} uses level {level}", state.depth);

    if top_level {
        let has_content = ctx.current_paragraph().is_some_and(Paragraph::has_content);
        if has_content && !ctx.cursor.auto_created {
            ctx.add_paragraph(None);
            ctx.add_paragraph(None);
        } else if pos.prev_is_list {
            ctx.add_paragraph(None);
        }
    }

    ctx.list = state;
    for item in &list.items {
        let para = Paragraph::new()
            .style(factory.style_id.clone())
            .numbering(factory.num_id, level);
        ctx.replace_if_current_paragraph_is_empty(para);
        ctx.render_children(&item.children)?;
    }
    ctx.list = outer;

    if top_level && !pos.is_last {
        ctx.add_paragraph(None);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_kind_nesting_increments() {
        let state = ListState::default()
            .enter(ListKind::Unordered)
            .enter(ListKind::Unordered)
            .enter(ListKind::Unordered);
        assert_eq!((state.depth, state.level), (3, 2));
    }

    #[test]
    fn kind_switch_resets_level() {
        let bullets = ListState::default()
            .enter(ListKind::Unordered)
            .enter(ListKind::Unordered);
        let numbers = bullets.enter(ListKind::Ordered);
        assert_eq!((numbers.depth, numbers.level), (3, 0));

        let back = numbers.enter(ListKind::Unordered);
        assert_eq!(back.level, 0);
    }
}
