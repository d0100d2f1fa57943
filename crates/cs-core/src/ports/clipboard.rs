//! System clipboard port - abstracts the platform pasteboard
//!
//! The capture engine depends only on this narrow capability set, which
//! lets tests substitute an in-memory clipboard.

use anyhow::Result;

use crate::clipboard::{ClipboardFormat, ClipboardWriteItem};

/// Platform clipboard access.
///
/// # Behavior / 行为
/// - `change_count()` must be cheap and monotonically increasing; it is
///   polled at a high rate and compared before anything else is read.
/// - Reads return `Ok(None)` when the format is not on the clipboard.
/// - A write replaces the whole clipboard content with the given items.
pub trait SystemClipboardPort: Send + Sync {
    /// Counter incremented on every clipboard change, including our own writes.
    fn change_count(&self) -> u64;

    /// Representation types currently on the clipboard.
    fn available_formats(&self) -> Result<Vec<ClipboardFormat>>;

    fn read_string(&self, format: &ClipboardFormat) -> Result<Option<String>>;

    fn read_bytes(&self, format: &ClipboardFormat) -> Result<Option<Vec<u8>>>;

    fn write_string(&self, text: &str) -> Result<()>;

    /// Publish several representations of one item in a single change.
    fn write_objects(&self, items: Vec<ClipboardWriteItem>) -> Result<()>;

    fn clear(&self) -> Result<()>;
}
