//! Platform adapters for clipstash: the native clipboard and the OCR engine.

pub mod clipboard;
pub mod ocr;

pub use clipboard::RsSystemClipboard;
pub use ocr::{DisabledOcr, TesseractError, TesseractOcr};
