//! The markdown conversion entry points

use log::{Level, debug, log_enabled, trace};

use crate::Result;
use crate::dom::{Block, Document, outline};
use crate::error::Error;
use crate::options::{MarkdownArgs, RenderOptions};
use crate::parser::{normalize_line_endings, parse};
use crate::render::{ImageService, Position, RenderContext};
use crate::splice::{self, InsertionPoint};

/// How deep conversions may re-enter themselves through the substitution
/// pass.
pub const MAX_NESTING: usize = 3;

/// The template engine's variable substitution, run over rendered markdown.
///
/// Rendered markdown may contain template tags of its own. The substitutor
/// resolves them in place, and may render nested markdown through the given
/// [`Reentry`].
pub trait Substitutor {
    /// Substitutes the template tags in `body`.
    fn substitute(
        &mut self,
        doc: &mut Document,
        body: &mut Vec<Block>,
        reentry: Reentry<'_>,
    ) -> Result<()>;
}

/// A substitutor leaving the rendered markdown untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSubstitution;

impl Substitutor for NoSubstitution {
    fn substitute(&mut self, _: &mut Document, _: &mut Vec<Block>, _: Reentry<'_>) -> Result<()> {
        Ok(())
    }
}

/// The body rendered markdown is spliced into.
enum Target<'b> {
    /// The body of the document itself.
    Document,
    /// A body under substitution, owned by an outer conversion.
    Body(&'b mut Vec<Block>),
}

/// Converts markdown fragments into document blocks.
#[derive(Debug, Clone)]
pub struct MarkdownConverter {
    options: RenderOptions,
}

impl MarkdownConverter {
    /// Creates a converter, validating the options.
    pub fn new(options: RenderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders `text` in place of the run at `at` of the document body.
    ///
    /// Returns the number of blocks that now take the place of the host
    /// paragraph.
    pub fn convert(
        &self,
        doc: &mut Document,
        at: InsertionPoint,
        text: &str,
        args: &MarkdownArgs,
        substitutor: &mut dyn Substitutor,
        images: &mut dyn ImageService,
    ) -> Result<usize> {
        self.convert_at(1, doc, Target::Document, at, text, args, substitutor, images)
    }

    #[allow(clippy::too_many_arguments)]
    fn convert_at(
        &self,
        depth: usize,
        doc: &mut Document,
        target: Target<'_>,
        at: InsertionPoint,
        text: &str,
        args: &MarkdownArgs,
        substitutor: &mut dyn Substitutor,
        images: &mut dyn ImageService,
    ) -> Result<usize> {
        if depth > MAX_NESTING {
            return Err(Error::nesting_exceeded(depth, MAX_NESTING));
        }

        let text = normalize_line_endings(text);
        let root = parse(&text);
        let base = match &target {
            Target::Document => splice::host_run_props(&doc.body, at)?,
            Target::Body(outer) => splice::host_run_props(outer, at)?,
        };

        let mut body = {
            let mut ctx = RenderContext::new(doc, &self.options, args, images, base);
            ctx.render(
                &root,
                Position {
                    prev_is_list: false,
                    is_last: true,
                },
            )?;
            ctx.into_body()
        };
        if log_enabled!(Level::Trace) {
            trace!("rendered markdown at depth {depth}:\n{}", outline(&body));
        }

        let tag_open = self.options.tag_open;
        if body.iter().flat_map(Block::texts).any(|t| t.contains(tag_open)) {
            let reentry = Reentry {
                converter: self,
                images,
                depth,
            };
            substitutor
                .substitute(doc, &mut body, reentry)
                .map_err(|e| e.in_substitution("failed to substitute rendered markdown"))?;
        } else {
            debug!("no template tags in rendered markdown, skipping substitution");
        }

        let target = match target {
            Target::Document => &mut doc.body,
            Target::Body(outer) => outer,
        };
        splice::splice(target, at, body)
    }
}

/// Renders markdown from within a substitution pass, one level deeper than
/// the conversion running the pass.
pub struct Reentry<'a> {
    converter: &'a MarkdownConverter,
    images: &'a mut dyn ImageService,
    depth: usize,
}

impl Reentry<'_> {
    /// The nesting depth of the conversion running the substitution pass,
    /// starting at 1.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Renders `text` in place of the run at `at` of `body`, the body under
    /// substitution.
    pub fn convert(
        &mut self,
        doc: &mut Document,
        body: &mut Vec<Block>,
        at: InsertionPoint,
        text: &str,
        args: &MarkdownArgs,
        substitutor: &mut dyn Substitutor,
    ) -> Result<usize> {
        self.converter.convert_at(
            self.depth + 1,
            doc,
            Target::Body(body),
            at,
            text,
            args,
            substitutor,
            self.images,
        )
    }
}
