//! # docxmd
//!
//! Renders markdown fragments into word-processing document templates.
//!
//! A template run holding markdown is replaced by native document structure:
//! paragraphs, styled runs, numbered lists, tables and images. The runs
//! around the host run are kept, and the rendered content goes through the
//! template engine's substitution again, since markdown may contain template
//! tags of its own.
//!
//! ```
//! use docxmd::dom::{Document, Paragraph, Run, outline};
//! use docxmd::{
//!     InsertionPoint, MarkdownArgs, MarkdownConverter, MediaImages, NoSubstitution,
//!     RenderOptions,
//! };
//!
//! let mut doc = Document::with_body(vec![
//!     Paragraph::new().add_run(Run::text("{notes}")).into(),
//! ]);
//! let converter = MarkdownConverter::new(RenderOptions::default())?;
//! converter.convert(
//!     &mut doc,
//!     InsertionPoint::new(0, 0),
//!     "Some **bold** text.",
//!     &MarkdownArgs::default(),
//!     &mut NoSubstitution,
//!     &mut MediaImages,
//! )?;
//! assert_eq!(outline(&doc.body), "p: \"Some \" b\"bold\" \" text.\"\n");
//! # Ok::<(), docxmd::Error>(())
//! ```

pub mod ast;
pub mod common;
mod convert;
pub mod dom;
mod error;
pub mod options;
pub mod parser;
mod render;
mod splice;

pub use convert::{MAX_NESTING, MarkdownConverter, NoSubstitution, Reentry, Substitutor};
pub use error::*;
pub use options::{LevelOptions, ListOptions, MarkdownArgs, RenderOptions};
pub use render::{ImageInfo, ImageService, MediaImages};
pub use splice::InsertionPoint;

/// The result type for docxmd.
pub type Result<T, Err = Error> = std::result::Result<T, Err>;
