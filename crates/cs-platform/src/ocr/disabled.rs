use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use cs_core::ports::OcrPort;

/// OCR engine used when recognition is switched off; never finds text.
pub struct DisabledOcr;

#[async_trait]
impl OcrPort for DisabledOcr {
    async fn recognize(&self, _image_bytes: Bytes) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}
