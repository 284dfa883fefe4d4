//! Embedded images

use base64::Engine;
use ecow::{EcoString, eco_format};
use image::GenericImageView;
use log::{debug, trace};

use super::RenderContext;
use crate::Result;
use crate::dom::{Document, Drawing, MediaPart, Run, RunChild};
use crate::error::{Error, ErrorKind};

/// EMU per pixel at 96 DPI.
const EMU_PER_PIXEL: u64 = 9525;

/// An image registered in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// The id a drawing uses to refer to the image.
    pub id: EcoString,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Clockwise rotation in degrees.
    pub rotation: u16,
}

/// Registers images in a document and builds drawings for them.
pub trait ImageService {
    /// Stores the encoded image `data` in `doc`.
    fn get_image(&mut self, doc: &mut Document, data: &[u8]) -> Result<ImageInfo>;

    /// Creates an inline drawing of a registered image, `width` and `height`
    /// given in EMU.
    fn create_picture(&self, info: &ImageInfo, width: u32, height: u32) -> Drawing;
}

/// Stores images in the media parts of the document. Identical images share
/// one part.
#[derive(Debug, Default)]
pub struct MediaImages;

impl ImageService for MediaImages {
    fn get_image(&mut self, doc: &mut Document, data: &[u8]) -> Result<ImageInfo> {
        let format =
            image::guess_format(data).map_err(|e| format!("unknown image format: {e}"))?;
        let (width, height) = image::load_from_memory_with_format(data, format)
            .map_err(|e| format!("unable to load image: {e}"))?
            .dimensions();

        let id = match doc.media.iter().find(|part| part.data == data) {
            Some(part) => part.id.clone(),
            None => {
                let id = eco_format!("image{}", doc.media.len() + 1);
                let extension = format.extensions_str().first().copied().unwrap_or("bin");
                doc.media.push(MediaPart {
                    id: id.clone(),
                    extension: extension.into(),
                    data: data.to_vec(),
                });
                id
            }
        };

        Ok(ImageInfo {
            id,
            width,
            height,
            rotation: 0,
        })
    }

    fn create_picture(&self, info: &ImageInfo, width: u32, height: u32) -> Drawing {
        Drawing {
            image_id: info.id.clone(),
            width,
            height,
            rotation: info.rotation,
        }
    }
}

/// Returns the base64 payload of a `data:image/...;base64,` URI.
fn embedded_payload(url: &str) -> Option<&str> {
    let (meta, payload) = url.strip_prefix("data:")?.split_once(',')?;
    (meta.starts_with("image/") && meta.ends_with(";base64")).then_some(payload)
}

/// The displayed size of an image in EMU, scaled down to `max_width`.
fn display_size(info: &ImageInfo, max_width: u32) -> (u32, u32) {
    let (mut width, mut height) = (
        u64::from(info.width) * EMU_PER_PIXEL,
        u64::from(info.height) * EMU_PER_PIXEL,
    );
    if info.rotation % 180 == 90 {
        std::mem::swap(&mut width, &mut height);
    }

    let max_width = u64::from(max_width);
    if width > max_width {
        height = height * max_width / width;
        width = max_width;
    }
    (
        u32::try_from(width).unwrap_or(u32::MAX),
        u32::try_from(height).unwrap_or(u32::MAX),
    )
}

pub(super) fn render_image(ctx: &mut RenderContext, url: &str) -> Result<()> {
    let Some(payload) = embedded_payload(url) else {
        trace!("skipping image that is not embedded: {url}");
        return Ok(());
    };

    let data = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::invalid_embedded_image(url, e.to_string()))?;
    let info = ctx
        .images
        .get_image(ctx.doc, &data)
        .map_err(|e| match e.kind() {
            ErrorKind::Message => Error::invalid_embedded_image(url, e.to_string()),
            _ => e,
        })?;

    let (width, height) = display_size(&info, ctx.options.max_image_width);
    debug!("embedding image {} at {width}x{height} EMU", info.id);
    let drawing = RunChild::Drawing(ctx.images.create_picture(&info, width, height));

    let props = ctx.run_props();
    let para = ctx.current_paragraph_mut()?;
    match para.children.last_mut() {
        Some(run) => run.children.push(drawing),
        None => para.children.push(Run {
            props,
            children: vec![drawing],
        }),
    }
    ctx.last_was_break = false;
    Ok(())
}
