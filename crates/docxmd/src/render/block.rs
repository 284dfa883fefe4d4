//! Leaf block rendering

use ecow::eco_format;

use super::RenderContext;
use crate::Result;
use crate::ast::Inline;
use crate::dom::{Border, Paragraph};

pub(super) fn paragraph(ctx: &mut RenderContext, content: &[Inline]) -> Result<()> {
    if ctx.current_has_children() {
        ctx.add_paragraph(None);
    }
    ctx.write_leaf_inline(content)
}

pub(super) fn heading(ctx: &mut RenderContext, level: u8, content: &[Inline]) -> Result<()> {
    ctx.replace_if_current_paragraph_is_empty(Paragraph::new().style(eco_format!("Heading{level}")));
    ctx.write_leaf_inline(content)?;
    ctx.add_paragraph(None);
    Ok(())
}

pub(super) fn thematic_break(ctx: &mut RenderContext) -> Result<()> {
    let mut rule = Paragraph::new();
    rule.props.bottom_border = Some(Border::default());
    ctx.replace_if_current_paragraph_is_empty(rule);
    ctx.add_paragraph(None);
    Ok(())
}

/// Code is written verbatim, one break per source line. Inside a list item
/// the code continues the item paragraph so it keeps the item indentation.
pub(super) fn code_block(ctx: &mut RenderContext, code: &str) -> Result<()> {
    if ctx.list.depth > 0 && ctx.current_has_children() {
        ctx.ensure_new_line()?;
    } else if ctx.current_has_children() {
        ctx.add_paragraph(None);
    }

    for (i, line) in code.split('\n').enumerate() {
        if i > 0 {
            ctx.new_line()?;
        }
        ctx.write(line)?;
    }
    Ok(())
}
