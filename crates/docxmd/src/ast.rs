//! The markdown syntax tree consumed by the renderer.
//!
//! The tree is produced by [`crate::parser::parse`] and never mutated
//! afterwards. Block and inline content are kept in separate enums so that the
//! renderer can dispatch over each with an exhaustive `match`.

use ecow::EcoString;

use crate::common::{Alignment, ListKind};

/// A block-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// The root of a parsed fragment.
    Document(Vec<Node>),
    /// A paragraph of inline content.
    Paragraph(Vec<Inline>),
    /// An ATX or setext heading.
    Heading {
        /// Heading level, 1 to 6.
        level: u8,
        /// Heading text.
        content: Vec<Inline>,
    },
    /// A bullet or numbered list.
    List(List),
    /// A pipe table.
    Table(Table),
    /// `---`
    ThematicBreak,
    /// Indented or fenced code, rendered verbatim.
    CodeBlock(EcoString),
    /// `> quoted`
    BlockQuote(Vec<Node>),
}

impl Node {
    /// Whether the node is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Node::List(..))
    }
}

/// A list block.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    /// Whether the list is numbered.
    pub ordered: bool,
    /// The list items.
    pub items: Vec<ListItem>,
}

impl List {
    /// The kind of the list.
    pub fn kind(&self) -> ListKind {
        ListKind::from_ordered(self.ordered)
    }
}

/// One list item. Nested lists appear among its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    /// Item content.
    pub children: Vec<Node>,
}

/// A table block.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column definitions, one per source column.
    pub columns: Vec<TableColumn>,
    /// Rows in source order, the header row first.
    pub rows: Vec<TableRow>,
}

/// Layout information of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TableColumn {
    /// The alignment marker of the column, if any.
    pub alignment: Option<Alignment>,
    /// Column width in percent of the table width, if known.
    pub width: Option<f32>,
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    /// Whether the row is the header row.
    pub header: bool,
    /// The inline content of each cell.
    pub cells: Vec<Vec<Inline>>,
}

/// An inline node.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// Emphasis delimited by `count` repetitions of `delimiter`.
    Emphasis {
        /// `*`, `_` or `~`.
        delimiter: char,
        /// Number of delimiter characters.
        count: usize,
        /// Emphasized content.
        content: Vec<Inline>,
    },
    /// Verbatim text.
    Literal(EcoString),
    /// A soft or hard line break.
    LineBreak,
    /// A link or image.
    Link {
        /// Whether the link is an image (`![alt](url)`).
        is_image: bool,
        /// The link destination.
        url: EcoString,
        /// The link text or image alt text.
        content: Vec<Inline>,
    },
}
