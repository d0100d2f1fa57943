mod decoder;
mod thumbnail_cache;
mod thumbnail_generator;

pub use decoder::ImageCrateDecoder;
pub use thumbnail_cache::ThumbnailCache;
pub use thumbnail_generator::InfraThumbnailGenerator;

#[cfg(test)]
pub(crate) fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let buffer = image::RgbImage::new(width, height);
    let mut png_bytes = Vec::new();
    image::DynamicImage::ImageRgb8(buffer)
        .write_to(
            &mut std::io::Cursor::new(&mut png_bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
    png_bytes
}
