//! Dependency grouping for [`ClipboardHistory`](crate::ClipboardHistory)
//! construction. Plain parameter bundle: no defaults, no hidden logic.

use std::sync::Arc;

use cs_core::ports::{
    ClockPort, ContentHashPort, HistoryObserverPort, ImageDecodePort, OcrPort,
    SystemClipboardPort,
};

pub struct HistoryDeps {
    pub clipboard: Arc<dyn SystemClipboardPort>,
    pub ocr: Arc<dyn OcrPort>,
    pub observer: Arc<dyn HistoryObserverPort>,
    pub hasher: Arc<dyn ContentHashPort>,
    pub image_decoder: Arc<dyn ImageDecodePort>,
    pub clock: Arc<dyn ClockPort>,
}
