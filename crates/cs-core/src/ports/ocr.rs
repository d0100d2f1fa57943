use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Text recognition over encoded image bytes.
///
/// The engine is opaque to the core. An `Err` is a recognition failure;
/// `Ok` with no lines means the image contained no text.
#[async_trait]
pub trait OcrPort: Send + Sync {
    /// Recognize text lines in `image_bytes`, top to bottom.
    async fn recognize(&self, image_bytes: Bytes) -> Result<Vec<String>>;
}
