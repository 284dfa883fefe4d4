//! Inline rendering

use log::trace;

use super::{FormatPatch, RenderContext, media};
use crate::Result;
use crate::ast::Inline;

pub(super) fn render_inline(ctx: &mut RenderContext, inline: &Inline, is_last: bool) -> Result<()> {
    match inline {
        Inline::Literal(text) => ctx.write(text),
        // a break ending the paragraph would only add an empty line
        Inline::LineBreak if is_last => Ok(()),
        Inline::LineBreak => ctx.new_line(),
        Inline::Emphasis {
            delimiter,
            count,
            content,
        } => {
            let mut scope = ctx.push_format(emphasis(*delimiter, *count));
            scope.write_leaf_inline(content)
        }
        Inline::Link {
            is_image: true,
            url,
            ..
        } => media::render_image(ctx, url),
        Inline::Link { url, .. } => {
            trace!("skipping link to {url}");
            Ok(())
        }
    }
}

fn emphasis(delimiter: char, count: usize) -> FormatPatch {
    match (delimiter, count) {
        ('~', _) => FormatPatch {
            strike: Some(true),
            ..FormatPatch::default()
        },
        (_, 1) => FormatPatch {
            italic: Some(true),
            ..FormatPatch::default()
        },
        (_, 2) => FormatPatch {
            bold: Some(true),
            ..FormatPatch::default()
        },
        _ => FormatPatch::default(),
    }
}
