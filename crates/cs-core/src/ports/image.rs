use anyhow::Result;

/// Pixel size of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Decoder used to reject clipboard image data that cannot be decoded.
pub trait ImageDecodePort: Send + Sync {
    /// Decode `bytes`, returning the image size. `Err` means undecodable.
    fn decode(&self, bytes: &[u8]) -> Result<ImageDimensions>;
}

/// Generated thumbnail payload and metadata.
pub struct GeneratedThumbnail {
    /// Encoded thumbnail bytes.
    pub thumbnail_bytes: Vec<u8>,
    /// MIME type of `thumbnail_bytes`.
    pub mime_type: String,
    pub original: ImageDimensions,
    pub thumbnail: ImageDimensions,
}

/// Generator port for creating thumbnails from image bytes.
#[async_trait::async_trait]
pub trait ThumbnailGeneratorPort: Send + Sync {
    async fn generate_thumbnail(&self, image_bytes: &[u8]) -> Result<GeneratedThumbnail>;
}
