//! Write a history entry back onto the system clipboard.

use std::sync::Arc;

use anyhow::{Context, Result};
use cs_core::classify::markdown_to_html;
use cs_core::ports::SystemClipboardPort;
use cs_core::{ClipboardEntry, ClipboardWriteItem, EntryPayload};
use tracing::info;

use crate::history::ClipboardHistory;

/// Representation written when restoring an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreFormat {
    /// The entry's own representation: text (with any captured rich data),
    /// image or file URL.
    Native,
    /// Only the plain string, rich payload dropped.
    PlainText,
    /// The plain string plus HTML rendered from it as markdown.
    RenderedMarkdown,
}

/// Restore an entry to the system clipboard.
///
/// The write happens under the history lock. When the entry is still in the
/// history it moves to the head and the change counter produced by the write
/// is recorded, so the next poll does not capture our own write again (image
/// data may come back re-encoded and would not dedup). A restored entry that
/// was deleted meanwhile is left for the next poll to capture as new.
pub struct RestoreClipboardSelection {
    history: Arc<ClipboardHistory>,
}

impl RestoreClipboardSelection {
    pub fn new(history: Arc<ClipboardHistory>) -> Self {
        Self { history }
    }

    #[tracing::instrument(
        name = "usecase.restore_selection.execute",
        skip(self, entry),
        fields(entry_id = %entry.id())
    )]
    pub async fn execute(&self, entry: &ClipboardEntry, format: RestoreFormat) -> Result<()> {
        let clipboard = &self.history.deps().clipboard;

        let mut state = self.history.lock().await;
        write_entry(clipboard.as_ref(), entry, format)?;
        let promoted = state.store.move_to_front(entry.id());
        if promoted {
            state.last_change_count = clipboard.change_count();
        }
        drop(state);

        info!(kind = ?entry.entry_type(), promoted, "Restored entry to clipboard");
        if promoted {
            self.history.notify();
        }
        Ok(())
    }
}

fn write_entry(
    clipboard: &dyn SystemClipboardPort,
    entry: &ClipboardEntry,
    format: RestoreFormat,
) -> Result<()> {
    match format {
        RestoreFormat::PlainText => clipboard
            .write_string(entry.content())
            .context("write plain text to clipboard"),
        RestoreFormat::Native => match native_items(entry) {
            Some(items) => clipboard
                .write_objects(items)
                .context("write entry to clipboard"),
            None => clipboard
                .write_string(entry.content())
                .context("write text to clipboard"),
        },
        RestoreFormat::RenderedMarkdown => clipboard
            .write_objects(vec![
                ClipboardWriteItem::Text(entry.content().to_string()),
                ClipboardWriteItem::Html(markdown_to_html(entry.content())),
            ])
            .context("write rendered markdown to clipboard"),
    }
}

/// Items for the native representation; `None` means a bare string write.
fn native_items(entry: &ClipboardEntry) -> Option<Vec<ClipboardWriteItem>> {
    match entry.payload() {
        EntryPayload::Image { image_data, .. } => {
            Some(vec![ClipboardWriteItem::Image(image_data.to_vec())])
        }
        EntryPayload::FileUrl { url } => Some(vec![ClipboardWriteItem::FileUrl(
            url.as_str().to_string(),
        )]),
        EntryPayload::Text { pasteboard_data } if !pasteboard_data.is_empty() => {
            let mut items = vec![ClipboardWriteItem::Text(entry.content().to_string())];
            items.extend(
                pasteboard_data
                    .iter()
                    .map(|(format, bytes)| ClipboardWriteItem::from_representation(format, bytes)),
            );
            Some(items)
        }
        EntryPayload::Text { .. } => None,
    }
}
