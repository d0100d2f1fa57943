//! # cs-core
//!
//! Core domain models and business logic for clipstash.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the clipboard entry model, the classifiers that derive properties from entry
//! content, fuzzy search, and the ports implemented by the outer layers.

// Public module exports
pub mod classify;
pub mod clipboard;
pub mod config;
pub mod entry;
pub mod ids;
pub mod ports;
pub mod search;

// Re-export commonly used types at the crate root
pub use classify::{CodeLanguage, FormatCategory};
pub use clipboard::{ClipboardFormat, ClipboardWriteItem, ContentHash, FileUrl};
pub use config::HistoryConfig;
pub use entry::{ClipboardEntry, EntryPayload, EntryType, PASSWORD_MASK};
pub use ids::EntryId;
