//! Port interfaces for the application layer
//!
//! Ports define the contract between the capture engine (use cases) and
//! infrastructure implementations. The engine only ever holds
//! `Arc<dyn Port>` values, so every collaborator can be replaced by a test
//! double.

mod clipboard;
mod clock;
mod hash;
mod image;
mod observer;
mod ocr;

pub use clipboard::SystemClipboardPort;
pub use clock::ClockPort;
pub use hash::ContentHashPort;
pub use image::{GeneratedThumbnail, ImageDecodePort, ImageDimensions, ThumbnailGeneratorPort};
pub use observer::{HistoryObserverPort, NoopObserver};
pub use ocr::OcrPort;
