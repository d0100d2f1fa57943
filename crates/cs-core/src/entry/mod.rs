//! Clipboard history entry model.
mod entry;

pub use entry::{ClipboardEntry, DedupKey, EntryPayload, EntryType, PASSWORD_MASK};
