//! Best-effort OCR of image entries.

use std::sync::Arc;

use bytes::Bytes;
use cs_core::EntryId;
use tracing::{debug, info, info_span, Instrument};

use crate::history::ClipboardHistory;

/// Recognize text in an image entry and store it as the entry's content.
///
/// Recognition runs outside the history lock; only the final update goes
/// through it. If the entry is gone by then (deleted or evicted), the result
/// is dropped.
pub struct BackfillOcr {
    history: Arc<ClipboardHistory>,
}

impl BackfillOcr {
    pub fn new(history: Arc<ClipboardHistory>) -> Self {
        Self { history }
    }

    /// Run the backfill for `entry_id` on a background task.
    pub fn spawn(history: &Arc<ClipboardHistory>, entry_id: EntryId, image_bytes: Bytes) {
        let usecase = Self::new(history.clone());
        let handle = tokio::spawn(async move {
            usecase.execute(&entry_id, image_bytes).await;
        });
        history.track_ocr(handle);
    }

    /// Returns `true` when the entry content was replaced.
    pub async fn execute(&self, entry_id: &EntryId, image_bytes: Bytes) -> bool {
        let span = info_span!(
            "usecase.backfill_ocr.execute",
            entry_id = %entry_id,
            size_bytes = image_bytes.len(),
        );

        async {
            let lines = match self.history.deps().ocr.recognize(image_bytes).await {
                Ok(lines) => lines,
                Err(err) => {
                    debug!(error = %err, "Text recognition failed");
                    return false;
                }
            };
            self.apply(entry_id, lines.join("\n")).await
        }
        .instrument(span)
        .await
    }

    /// Store recognized `text` on the entry if it still exists.
    pub async fn apply(&self, entry_id: &EntryId, text: String) -> bool {
        if text.trim().is_empty() {
            debug!(entry_id = %entry_id, "No text recognized");
            return false;
        }

        let chars = text.chars().count();
        let updated = {
            let mut state = self.history.lock().await;
            state.store.update(entry_id, |entry| entry.with_content(text))
        };

        if updated {
            info!(entry_id = %entry_id, chars, "Stored recognized text");
            self.history.notify();
        } else {
            debug!(entry_id = %entry_id, "Entry gone before recognition finished");
        }
        updated
    }
}
