//! A compact, line-oriented text rendering of document blocks.
//!
//! ```text
//! p[style=Heading1]: "Title"
//! p: "Some " b"bold" " text."
//! table[width=pct:5000 cols=2]
//!   row[header]
//!     cell[width=auto]
//!       p[align=right]: "a"
//! ```

use std::fmt::Write;

use super::{Block, Paragraph, Run, RunChild, RunProps, Width};
use crate::common::Alignment;

/// Renders blocks to the outline format, one line per paragraph.
pub fn outline(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        write_block(&mut out, block, 0);
    }
    out
}

fn write_block(out: &mut String, block: &Block, indent: usize) {
    pad(out, indent);
    match block {
        Block::Paragraph(para) => {
            write_paragraph(out, para);
            out.push('\n');
        }
        Block::Table(table) => {
            let mut attrs = Vec::new();
            if let Some(style) = &table.props.style {
                attrs.push(format!("style={style}"));
            }
            attrs.push(format!("width={}", width(table.props.width)));
            attrs.push(format!("cols={}", table.grid.len()));
            out.push_str("table");
            write_attrs(out, &attrs);
            out.push('\n');

            for row in &table.rows {
                pad(out, indent + 2);
                out.push_str("row");
                if row.header {
                    out.push_str("[header]");
                }
                out.push('\n');

                for cell in &row.cells {
                    pad(out, indent + 4);
                    out.push_str("cell");
                    write_attrs(out, &[format!("width={}", width(cell.width))]);
                    out.push('\n');
                    for child in &cell.children {
                        write_block(out, child, indent + 6);
                    }
                }
            }
        }
    }
}

fn write_paragraph(out: &mut String, para: &Paragraph) {
    let props = &para.props;
    let mut attrs = Vec::new();
    if let Some(style) = &props.style {
        attrs.push(format!("style={style}"));
    }
    if let Some(num) = &props.numbering {
        attrs.push(format!("num={}:{}", num.num_id, num.level));
    }
    if let Some(align) = props.align {
        let align = match align {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        };
        attrs.push(format!("align={align}"));
    }
    if props.bottom_border.is_some() {
        attrs.push("border".to_owned());
    }

    out.push('p');
    write_attrs(out, &attrs);

    if para.children.is_empty() {
        return;
    }
    out.push(':');
    for run in &para.children {
        out.push(' ');
        write_run(out, run);
    }
}

fn write_run(out: &mut String, run: &Run) {
    write_flags(out, &run.props);
    out.push('"');
    for child in &run.children {
        match child {
            RunChild::Text(text) => out.push_str(&text.value),
            RunChild::Break => out.push('⏎'),
            RunChild::Drawing(drawing) => {
                let _ = write!(
                    out,
                    "[{} {}x{}]",
                    drawing.image_id, drawing.width, drawing.height
                );
            }
        }
    }
    out.push('"');
}

fn write_flags(out: &mut String, props: &RunProps) {
    if let Some(style) = &props.style {
        let _ = write!(out, "{{{style}}}");
    }
    for (flag, value) in [("b", props.bold), ("i", props.italic), ("s", props.strike)] {
        match value {
            Some(true) => out.push_str(flag),
            Some(false) => {
                out.push('!');
                out.push_str(flag);
            }
            None => {}
        }
    }
}

fn write_attrs(out: &mut String, attrs: &[String]) {
    if attrs.is_empty() {
        return;
    }
    out.push('[');
    out.push_str(&attrs.join(" "));
    out.push(']');
}

fn width(width: Width) -> String {
    match width {
        Width::Auto => "auto".to_owned(),
        Width::Pct(pct) => format!("pct:{pct}"),
    }
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}
