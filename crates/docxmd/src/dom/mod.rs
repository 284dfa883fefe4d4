//! The destination document model.
//!
//! This is a small, mutable subset of the WordprocessingML document tree:
//! - Body: block-level content ([`Block`])
//! - Styles: the document style catalog ([`StyleCatalog`])
//! - Numbering: abstract numbering definitions and instances
//!   ([`NumberingCatalog`])
//! - Media: embedded image parts ([`MediaPart`])
//!
//! Every run and paragraph property is optional. An absent property inherits
//! from the style hierarchy, which is not the same as an explicit `false`.

mod numbering;
mod outline;
mod styles;

#[cfg(feature = "docx")]
mod docx;

pub use numbering::{AbstractNumbering, Level, NumberFormat, NumberingCatalog, NumberingInstance};
pub use outline::outline;
pub use styles::{Style, StyleCatalog, StyleKind};
pub(crate) use styles::style_id_from_name;

use ecow::EcoString;

use crate::common::Alignment;

/// A destination document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Top-level blocks.
    pub body: Vec<Block>,
    /// The style catalog.
    pub styles: StyleCatalog,
    /// The numbering catalog.
    pub numbering: NumberingCatalog,
    /// Embedded media.
    pub media: Vec<MediaPart>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document with the given body.
    pub fn with_body(body: Vec<Block>) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    /// Returns the first top-level table of the body.
    pub fn first_table(&self) -> Option<&Table> {
        self.body.iter().find_map(|block| match block {
            Block::Table(table) => Some(table),
            Block::Paragraph(..) => None,
        })
    }

    /// Looks up an embedded media part.
    pub fn media(&self, id: &str) -> Option<&MediaPart> {
        self.media.iter().find(|part| part.id == id)
    }
}

/// Block-level content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A paragraph.
    Paragraph(Paragraph),
    /// A table.
    Table(Table),
}

impl Block {
    /// Returns the paragraph, if the block is one.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(para) => Some(para),
            Block::Table(..) => None,
        }
    }

    /// Returns the paragraph mutably, if the block is one.
    pub fn as_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self {
            Block::Paragraph(para) => Some(para),
            Block::Table(..) => None,
        }
    }

    /// Visits all text of the block, including text in table cells.
    pub fn texts(&self) -> Box<dyn Iterator<Item = &EcoString> + '_> {
        match self {
            Block::Paragraph(para) => Box::new(para.texts()),
            Block::Table(table) => Box::new(
                table
                    .rows
                    .iter()
                    .flat_map(|row| row.cells.iter())
                    .flat_map(|cell| cell.children.iter())
                    .flat_map(|block| block.texts()),
            ),
        }
    }
}

impl From<Paragraph> for Block {
    fn from(para: Paragraph) -> Self {
        Block::Paragraph(para)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}

/// A paragraph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    /// Paragraph properties.
    pub props: ParagraphProps,
    /// The runs of the paragraph.
    pub children: Vec<Run>,
}

impl Paragraph {
    /// Creates an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paragraph style.
    pub fn style(mut self, style: impl Into<EcoString>) -> Self {
        self.props.style = Some(style.into());
        self
    }

    /// Binds the paragraph to a numbering instance.
    pub fn numbering(mut self, num_id: usize, level: usize) -> Self {
        self.props.numbering = Some(NumberingRef { num_id, level });
        self
    }

    /// Sets the paragraph alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.props.align = Some(align);
        self
    }

    /// Appends a run.
    pub fn add_run(mut self, run: Run) -> Self {
        self.children.push(run);
        self
    }

    /// Whether the paragraph has no runs at all.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether the paragraph shows anything: visible text, a break or a
    /// drawing.
    pub fn has_content(&self) -> bool {
        self.children.iter().any(Run::has_content)
    }

    /// Visits the text of all runs.
    pub fn texts(&self) -> impl Iterator<Item = &EcoString> {
        self.children.iter().flat_map(|run| {
            run.children.iter().filter_map(|child| match child {
                RunChild::Text(text) => Some(&text.value),
                RunChild::Break | RunChild::Drawing(..) => None,
            })
        })
    }

    /// Concatenated text of the paragraph, breaks shown as `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for run in &self.children {
            for child in &run.children {
                match child {
                    RunChild::Text(text) => out.push_str(&text.value),
                    RunChild::Break => out.push('\n'),
                    RunChild::Drawing(..) => {}
                }
            }
        }
        out
    }
}

/// Paragraph properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphProps {
    /// The paragraph style id.
    pub style: Option<EcoString>,
    /// The numbering binding of a list paragraph.
    pub numbering: Option<NumberingRef>,
    /// Paragraph alignment.
    pub align: Option<Alignment>,
    /// A bottom border, used for horizontal rules.
    pub bottom_border: Option<Border>,
}

/// Binds a paragraph to a numbering instance and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingRef {
    /// The numbering instance id.
    pub num_id: usize,
    /// The level inside the numbering definition.
    pub level: usize,
}

/// A paragraph border line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    /// Line width in eighths of a point.
    pub size: u32,
    /// Space between the border and the text in points.
    pub space: u32,
}

impl Default for Border {
    fn default() -> Self {
        Self { size: 6, space: 1 }
    }
}

/// A run of uniformly formatted content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    /// Run properties.
    pub props: RunProps,
    /// The content of the run.
    pub children: Vec<RunChild>,
}

impl Run {
    /// Creates an empty run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a run holding `text`.
    pub fn text(text: impl Into<EcoString>) -> Self {
        Self::new().add_text(text)
    }

    /// Appends text.
    pub fn add_text(mut self, text: impl Into<EcoString>) -> Self {
        self.children.push(RunChild::Text(Text::new(text)));
        self
    }

    /// Replaces the run properties.
    pub fn props(mut self, props: RunProps) -> Self {
        self.props = props;
        self
    }

    fn has_content(&self) -> bool {
        self.children.iter().any(|child| match child {
            RunChild::Text(text) => !text.value.trim().is_empty(),
            RunChild::Break | RunChild::Drawing(..) => true,
        })
    }
}

/// Run properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunProps {
    /// The character style id.
    pub style: Option<EcoString>,
    /// Bold.
    pub bold: Option<bool>,
    /// Italic.
    pub italic: Option<bool>,
    /// Single strike-through.
    pub strike: Option<bool>,
    /// Font size in half-points.
    pub size: Option<usize>,
    /// Font family.
    pub font: Option<EcoString>,
    /// Text color as `RRGGBB`.
    pub color: Option<EcoString>,
}

/// Content of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunChild {
    /// Text.
    Text(Text),
    /// A text-wrapping line break.
    Break,
    /// An inline drawing.
    Drawing(Drawing),
}

/// A text node.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// The text.
    pub value: EcoString,
    /// Whether leading and trailing whitespace must be kept.
    pub preserve_space: bool,
}

impl Text {
    /// Creates a text node, preserving space when the text starts or ends
    /// with whitespace.
    pub fn new(value: impl Into<EcoString>) -> Self {
        let value = value.into();
        let preserve_space =
            value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace);
        Self {
            value,
            preserve_space,
        }
    }
}

/// An inline picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawing {
    /// The id of the [`MediaPart`] holding the image.
    pub image_id: EcoString,
    /// Width in EMU.
    pub width: u32,
    /// Height in EMU.
    pub height: u32,
    /// Clockwise rotation in degrees.
    pub rotation: u16,
}

/// An embedded image part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPart {
    /// The relationship id.
    pub id: EcoString,
    /// File extension of the image format.
    pub extension: EcoString,
    /// Encoded image bytes.
    pub data: Vec<u8>,
}

/// A width specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Width {
    /// Sized by content.
    #[default]
    Auto,
    /// Fiftieths of a percent, i.e. `5000` is 100%.
    Pct(u32),
}

/// A table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Table properties.
    pub props: TableProps,
    /// Grid columns.
    pub grid: Vec<GridColumn>,
    /// Rows.
    pub rows: Vec<TableRow>,
}

/// Table properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableProps {
    /// The table style id.
    pub style: Option<EcoString>,
    /// Preferred table width.
    pub width: Width,
}

/// A grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridColumn {
    /// Preferred width.
    pub width: Width,
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    /// Whether the row repeats as header on every page.
    pub header: bool,
    /// Cells.
    pub cells: Vec<TableCell>,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    /// Preferred width.
    pub width: Width,
    /// Cell content.
    pub children: Vec<Block>,
}

impl TableCell {
    /// Concatenated text of all paragraphs of the cell.
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .filter_map(Block::as_paragraph)
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
