//! Clipboard domain primitives shared by the ports and the entry model.
mod content_hash;
mod file_url;
mod format;
mod write_item;

pub use content_hash::ContentHash;
pub use file_url::FileUrl;
pub use format::ClipboardFormat;
pub use write_item::ClipboardWriteItem;
