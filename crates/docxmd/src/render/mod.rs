//! Rendering of the markdown syntax tree into document blocks.
//!
//! The renderer writes into a scratch body through a cursor that points at
//! the current container. Inline content is always appended to the paragraph
//! under the cursor, block content moves the cursor forward.

mod block;
mod inline;
mod list;
mod media;
mod numbering;
mod table;

pub use media::{ImageInfo, ImageService, MediaImages};

use std::ops::{Deref, DerefMut};

use ecow::EcoString;

use crate::Result;
use crate::ast::{Inline, Node};
use crate::common::ListKind;
use crate::dom::{Block, Document, Paragraph, Run, RunChild, RunProps, Table};
use crate::error::Error;
use crate::options::{MarkdownArgs, RenderOptions};

use list::ListState;
use numbering::ListStyleFactory;

/// Where the current container of the renderer is.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    /// Index of the container in the body being built.
    index: usize,
    /// Whether the renderer created the container itself.
    auto_created: bool,
}

/// One frame of the format stack.
#[derive(Debug, Clone, Default)]
struct FormatFrame {
    bold: bool,
    italic: bool,
    strike: bool,
    style: Option<EcoString>,
}

/// Changes to the current format. `None` inherits from the enclosing frame.
#[derive(Debug, Clone, Default)]
pub(crate) struct FormatPatch {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub strike: Option<bool>,
    pub style: Option<EcoString>,
}

/// The position of a block among its siblings.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Position {
    /// Whether the preceding sibling is a list.
    pub prev_is_list: bool,
    /// Whether the block is the last of its parent.
    pub is_last: bool,
}

/// The state of one conversion.
pub(crate) struct RenderContext<'a> {
    doc: &'a mut Document,
    options: &'a RenderOptions,
    args: &'a MarkdownArgs,
    images: &'a mut dyn ImageService,

    body: Vec<Block>,
    cursor: Cursor,
    formats: Vec<FormatFrame>,
    /// Run properties of the host run, the base of every written run.
    base: RunProps,
    last_was_break: bool,

    list: ListState,
    list_styles: [Option<ListStyleFactory>; 2],
    table_style: Option<Option<EcoString>>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        doc: &'a mut Document,
        options: &'a RenderOptions,
        args: &'a MarkdownArgs,
        images: &'a mut dyn ImageService,
        base: RunProps,
    ) -> Self {
        Self {
            doc,
            options,
            args,
            images,
            body: vec![Paragraph::new().into()],
            cursor: Cursor {
                index: 0,
                auto_created: false,
            },
            formats: vec![FormatFrame::default()],
            base,
            last_was_break: false,
            list: ListState::default(),
            list_styles: [None, None],
            table_style: None,
        }
    }

    /// Consumes the context, returning the rendered blocks.
    pub(crate) fn into_body(self) -> Vec<Block> {
        self.body
    }

    /// Renders a block node.
    pub(crate) fn render(&mut self, node: &Node, pos: Position) -> Result<()> {
        match node {
            Node::Document(children) | Node::BlockQuote(children) => {
                self.render_children(children)
            }
            Node::Paragraph(content) => block::paragraph(self, content),
            Node::Heading { level, content } => block::heading(self, *level, content),
            Node::List(list) => list::render_list(self, list, pos),
            Node::Table(table) => table::render_table(self, table),
            Node::ThematicBreak => block::thematic_break(self),
            Node::CodeBlock(code) => block::code_block(self, code),
        }
    }

    /// Renders sibling block nodes in order.
    pub(crate) fn render_children(&mut self, children: &[Node]) -> Result<()> {
        for (i, child) in children.iter().enumerate() {
            let pos = Position {
                prev_is_list: i > 0 && children[i - 1].is_list(),
                is_last: i + 1 == children.len(),
            };
            self.render(child, pos)?;
        }
        Ok(())
    }

    /// Renders the inline content of a leaf block into the current paragraph.
    pub(crate) fn write_leaf_inline(&mut self, content: &[Inline]) -> Result<()> {
        for (i, child) in content.iter().enumerate() {
            inline::render_inline(self, child, i + 1 == content.len())?;
        }
        Ok(())
    }

    /// Pushes a format frame, popped when the returned scope is dropped.
    pub(crate) fn push_format(&mut self, patch: FormatPatch) -> FormatScope<'_, 'a> {
        let depth = self.formats.len();
        let top = self.top_format();
        let frame = FormatFrame {
            bold: patch.bold.unwrap_or(top.bold),
            italic: patch.italic.unwrap_or(top.italic),
            strike: patch.strike.unwrap_or(top.strike),
            style: patch.style.or_else(|| top.style.clone()),
        };
        self.formats.push(frame);
        FormatScope { ctx: self, depth }
    }

    fn top_format(&self) -> &FormatFrame {
        // the root frame is never popped
        &self.formats[self.formats.len() - 1]
    }

    /// The properties of a run written now: the host run properties, with
    /// absent ones filled from the format stack.
    fn run_props(&self) -> RunProps {
        let mut props = self.base.clone();
        let top = self.top_format();
        let fill = |slot: &mut Option<bool>, on: bool| {
            if slot.is_none() && on {
                *slot = Some(true);
            }
        };
        fill(&mut props.bold, top.bold);
        fill(&mut props.italic, top.italic);
        fill(&mut props.strike, top.strike);
        if props.style.is_none() {
            props.style = top.style.clone();
        }
        props
    }

    /// Appends a text run to the current paragraph.
    pub(crate) fn write(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let run = Run::text(text).props(self.run_props());
        self.current_paragraph_mut()?.children.push(run);
        self.last_was_break = false;
        Ok(())
    }

    /// Appends a line break to the current paragraph.
    pub(crate) fn new_line(&mut self) -> Result<()> {
        let run = Run {
            props: self.run_props(),
            children: vec![RunChild::Break],
        };
        self.current_paragraph_mut()?.children.push(run);
        self.last_was_break = true;
        Ok(())
    }

    /// Appends a line break unless the last written element is one.
    pub(crate) fn ensure_new_line(&mut self) -> Result<()> {
        if self.last_was_break {
            return Ok(());
        }
        self.new_line()
    }

    /// The paragraph under the cursor, if the cursor is on one.
    pub(crate) fn current_paragraph(&self) -> Option<&Paragraph> {
        self.body.get(self.cursor.index).and_then(Block::as_paragraph)
    }

    pub(crate) fn current_paragraph_mut(&mut self) -> Result<&mut Paragraph> {
        self.body
            .get_mut(self.cursor.index)
            .and_then(Block::as_paragraph_mut)
            .ok_or_else(Error::missing_anchor)
    }

    /// Whether the current paragraph has runs.
    pub(crate) fn current_has_children(&self) -> bool {
        self.current_paragraph().is_some_and(|para| !para.is_empty())
    }

    /// Inserts a paragraph after the current container and moves the cursor
    /// onto it.
    pub(crate) fn add_paragraph(&mut self, para: Option<Paragraph>) {
        let index = (self.cursor.index + 1).min(self.body.len());
        self.body.insert(index, para.unwrap_or_default().into());
        self.cursor = Cursor {
            index,
            auto_created: true,
        };
        self.last_was_break = false;
    }

    /// Like [`Self::add_paragraph`], but drops the previous container if it
    /// never received any runs.
    pub(crate) fn replace_if_current_paragraph_is_empty(&mut self, para: Paragraph) {
        let prev = self.cursor.index;
        self.add_paragraph(Some(para));
        let prev_is_empty = self
            .body
            .get(prev)
            .and_then(Block::as_paragraph)
            .is_some_and(Paragraph::is_empty);
        if prev_is_empty {
            self.body.remove(prev);
            self.cursor.index -= 1;
        }
    }

    /// Places a table relative to the current container.
    ///
    /// An empty paragraph created by the renderer is reclaimed: the table goes
    /// before it and the paragraph stays current. Otherwise the table goes
    /// after the current container, followed by a fresh paragraph.
    pub(crate) fn insert_table(&mut self, table: Table) {
        let reclaim = self.cursor.auto_created
            && self.current_paragraph().is_some_and(Paragraph::is_empty);
        if reclaim {
            self.body.insert(self.cursor.index, table.into());
            self.cursor.index += 1;
        } else {
            let index = (self.cursor.index + 1).min(self.body.len());
            self.body.insert(index, table.into());
            self.cursor.index = index;
            self.add_paragraph(None);
        }
    }

    /// Renders into another container, e.g. a table cell. The cursor starts
    /// at the first block of `body` and is restored afterwards.
    pub(crate) fn with_container<R>(
        &mut self,
        body: &mut Vec<Block>,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        std::mem::swap(&mut self.body, body);
        let cursor = std::mem::replace(
            &mut self.cursor,
            Cursor {
                index: 0,
                auto_created: false,
            },
        );
        let last_was_break = std::mem::replace(&mut self.last_was_break, false);

        let res = f(self);

        std::mem::swap(&mut self.body, body);
        self.cursor = cursor;
        self.last_was_break = last_was_break;
        res
    }

    /// The list style factory of `kind`, created on first use.
    fn list_style(&mut self, kind: ListKind) -> ListStyleFactory {
        let slot = &mut self.list_styles[kind.index()];
        let factory = slot.get_or_insert_with(|| {
            let name = self
                .args
                .list_style(kind)
                .unwrap_or(&self.options.list(kind).style_name);
            ListStyleFactory::ensure_exists(self.doc, kind, name)
        });
        factory.clone()
    }
}

/// A pushed format frame. Dropping the scope pops the frame and every frame
/// pushed above it.
pub(crate) struct FormatScope<'c, 'a> {
    ctx: &'c mut RenderContext<'a>,
    depth: usize,
}

impl<'a> Deref for FormatScope<'_, 'a> {
    type Target = RenderContext<'a>;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for FormatScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for FormatScope<'_, '_> {
    fn drop(&mut self) {
        self.ctx.formats.truncate(self.depth);
    }
}
