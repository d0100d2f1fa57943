use anyhow::{Context, Result};
use cs_core::ports::{ImageDecodePort, ImageDimensions};
use image::GenericImageView;

/// Decodes PNG, TIFF, JPEG and WebP through the `image` crate.
pub struct ImageCrateDecoder;

impl ImageDecodePort for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<ImageDimensions> {
        let decoded = image::load_from_memory(bytes).context("decode clipboard image bytes")?;
        let (width, height) = decoded.dimensions();
        Ok(ImageDimensions { width, height })
    }
}
