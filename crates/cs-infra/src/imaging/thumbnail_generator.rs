use anyhow::{Context, Result};
use async_trait::async_trait;
use cs_core::ports::{GeneratedThumbnail, ImageDimensions, ThumbnailGeneratorPort};
use image::{imageops::FilterType, ColorType, GenericImageView};

pub const THUMBNAIL_MIME_TYPE: &str = "image/webp";

/// Lossless WebP thumbnails bounded by `max_edge` on the longest side.
pub struct InfraThumbnailGenerator {
    max_edge: u32,
}

impl InfraThumbnailGenerator {
    pub fn new(max_edge: u32) -> Self {
        Self {
            max_edge: max_edge.max(1),
        }
    }
}

#[async_trait]
impl ThumbnailGeneratorPort for InfraThumbnailGenerator {
    async fn generate_thumbnail(&self, image_bytes: &[u8]) -> Result<GeneratedThumbnail> {
        let decoded =
            image::load_from_memory(image_bytes).context("decode image bytes for thumbnail")?;
        let (original_width, original_height) = decoded.dimensions();
        let (target_width, target_height) =
            fit_within(original_width, original_height, self.max_edge);

        let rgba = if (target_width, target_height) == (original_width, original_height) {
            decoded.to_rgba8()
        } else {
            image::imageops::resize(&decoded, target_width, target_height, FilterType::Triangle)
        };

        let (width, height) = rgba.dimensions();
        let mut thumbnail_bytes = Vec::new();
        image::codecs::webp::WebPEncoder::new_lossless(&mut thumbnail_bytes)
            .encode(rgba.as_raw(), width, height, ColorType::Rgba8.into())
            .context("encode thumbnail to webp")?;

        Ok(GeneratedThumbnail {
            thumbnail_bytes,
            mime_type: THUMBNAIL_MIME_TYPE.to_string(),
            original: ImageDimensions {
                width: original_width,
                height: original_height,
            },
            thumbnail: ImageDimensions { width, height },
        })
    }
}

/// Scale `(width, height)` so the longest edge is at most `max_edge`,
/// preserving aspect ratio. Never upscales and never returns a zero edge.
fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    let scale = |edge: u32, longest: u32| -> u32 {
        ((f64::from(edge) * f64::from(max_edge) / f64::from(longest)).round() as u32).max(1)
    };
    if width >= height {
        (max_edge, scale(height, width))
    } else {
        (scale(width, height), max_edge)
    }
}
