//! Markdown parsing (markdown string → [`Node`]).
//!
//! Pipeline: markdown string → comrak AST → [`Node`] tree. Constructs that the
//! renderer has no counterpart for (raw HTML, footnotes, front matter, ...)
//! are dropped here.

use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use ecow::EcoString;
use log::debug;

use crate::ast::{Inline, List, ListItem, Node, Table, TableColumn, TableRow};
use crate::common::Alignment;

/// Parses a markdown fragment.
pub fn parse(source: &str) -> Node {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, source, &options);

    Node::Document(collect_blocks(root))
}

/// Collapses `\r\n` and lone `\r` into `\n`, so that every line ending of
/// the source becomes at most one line break and blank lines keep separating
/// paragraphs.
pub fn normalize_line_endings(source: &str) -> std::borrow::Cow<'_, str> {
    if !source.contains('\r') {
        return source.into();
    }
    source.replace("\r\n", "\n").replace('\r', "\n").into()
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options
}

fn collect_blocks<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    node.children().filter_map(convert_block).collect()
}

fn convert_block<'a>(node: &'a AstNode<'a>) -> Option<Node> {
    let data = node.data.borrow();

    let block = match &data.value {
        NodeValue::Paragraph => Node::Paragraph(collect_inlines(node)),
        NodeValue::Heading(heading) => Node::Heading {
            level: heading.level.clamp(1, 6),
            content: collect_inlines(node),
        },
        NodeValue::List(list) => Node::List(List {
            ordered: matches!(list.list_type, ListType::Ordered),
            items: node
                .children()
                .map(|item| ListItem {
                    children: collect_blocks(item),
                })
                .collect(),
        }),
        NodeValue::Table(table) => {
            let columns = table
                .alignments
                .iter()
                .map(|align| TableColumn {
                    alignment: convert_alignment(*align),
                    // pipe tables carry no column widths
                    width: None,
                })
                .collect();
            Node::Table(Table {
                columns,
                rows: node.children().filter_map(convert_row).collect(),
            })
        }
        NodeValue::ThematicBreak => Node::ThematicBreak,
        NodeValue::CodeBlock(code) => {
            let literal = code.literal.strip_suffix('\n').unwrap_or(&code.literal);
            Node::CodeBlock(literal.into())
        }
        NodeValue::BlockQuote => Node::BlockQuote(collect_blocks(node)),
        other => {
            debug!("dropping unsupported markdown block: {other:?}");
            return None;
        }
    };

    Some(block)
}

fn convert_row<'a>(node: &'a AstNode<'a>) -> Option<TableRow> {
    let data = node.data.borrow();
    let NodeValue::TableRow(header) = &data.value else {
        return None;
    };

    Some(TableRow {
        header: *header,
        cells: node.children().map(collect_inlines).collect(),
    })
}

fn convert_alignment(align: TableAlignment) -> Option<Alignment> {
    match align {
        TableAlignment::None => None,
        TableAlignment::Left => Some(Alignment::Left),
        TableAlignment::Center => Some(Alignment::Center),
        TableAlignment::Right => Some(Alignment::Right),
    }
}

fn collect_inlines<'a>(node: &'a AstNode<'a>) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for child in node.children() {
        convert_inline(child, &mut inlines);
    }
    inlines
}

fn convert_inline<'a>(node: &'a AstNode<'a>, out: &mut Vec<Inline>) {
    let data = node.data.borrow();

    let inline = match &data.value {
        NodeValue::Text(text) => {
            push_literal(out, text);
            return;
        }
        NodeValue::Code(code) => {
            push_literal(out, &code.literal);
            return;
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => Inline::LineBreak,
        NodeValue::Emph => emphasis('*', 1, node),
        NodeValue::Strong => emphasis('*', 2, node),
        NodeValue::Strikethrough => emphasis('~', 2, node),
        NodeValue::Link(link) => Inline::Link {
            is_image: false,
            url: link.url.as_str().into(),
            content: collect_inlines(node),
        },
        NodeValue::Image(link) => Inline::Link {
            is_image: true,
            url: link.url.as_str().into(),
            content: collect_inlines(node),
        },
        other => {
            debug!("dropping unsupported markdown inline: {other:?}");
            return;
        }
    };

    out.push(inline);
}

fn emphasis<'a>(delimiter: char, count: usize, node: &'a AstNode<'a>) -> Inline {
    Inline::Emphasis {
        delimiter,
        count,
        content: collect_inlines(node),
    }
}

/// Adjacent text nodes are merged, so that one span of text becomes one run.
fn push_literal(out: &mut Vec<Inline>, text: &str) {
    if let Some(Inline::Literal(prev)) = out.last_mut() {
        prev.push_str(text);
    } else {
        out.push(Inline::Literal(EcoString::from(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Literal(s.into())
    }

    #[test]
    fn emphasis_keeps_delimiter_count() {
        let Node::Document(blocks) = parse("Some **bold** and *italic* text.") else {
            panic!("expected a document");
        };
        assert_eq!(
            blocks,
            vec![Node::Paragraph(vec![
                text("Some "),
                Inline::Emphasis {
                    delimiter: '*',
                    count: 2,
                    content: vec![text("bold")],
                },
                text(" and "),
                Inline::Emphasis {
                    delimiter: '*',
                    count: 1,
                    content: vec![text("italic")],
                },
                text(" text."),
            ])]
        );
    }

    #[test]
    fn crlf_separated_paragraphs_stay_apart() {
        let source = normalize_line_endings("first\r\n\r\nsecond");
        let Node::Document(blocks) = parse(&source) else {
            panic!("expected a document");
        };
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn nested_lists() {
        let Node::Document(blocks) = parse("- a\n  1. b\n- c") else {
            panic!("expected a document");
        };
        let [Node::List(list)] = blocks.as_slice() else {
            panic!("expected one list, got {blocks:?}");
        };
        assert!(!list.ordered);
        assert_eq!(list.items.len(), 2);
        assert!(matches!(&list.items[0].children[1], Node::List(inner) if inner.ordered));
    }

    #[test]
    fn table_alignment() {
        let Node::Document(blocks) = parse("| a | b | c |\n|:--|:-:|---|\n| 1 | 2 | 3 |") else {
            panic!("expected a document");
        };
        let [Node::Table(table)] = blocks.as_slice() else {
            panic!("expected one table, got {blocks:?}");
        };
        let aligns: Vec<_> = table.columns.iter().map(|c| c.alignment).collect();
        assert_eq!(
            aligns,
            vec![Some(Alignment::Left), Some(Alignment::Center), None]
        );
        assert_eq!(table.rows.len(), 2);
        assert!(table.rows[0].header);
        assert!(!table.rows[1].header);
    }
}
