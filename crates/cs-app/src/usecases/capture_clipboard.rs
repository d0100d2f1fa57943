//! Clipboard change detection and capture.
//!
//! One execution classifies at most one clipboard change. Candidates are
//! tried in a fixed order (image, file URL, text) and the first that yields
//! an entry wins. Every failure on this path is absorbed: it is logged and
//! the change simply produces no entry.

use std::collections::BTreeMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use cs_core::classify::{has_concealed_marker, is_password_like};
use cs_core::{ClipboardEntry, ClipboardFormat, EntryId, FileUrl};
use tracing::{debug, info, info_span, warn};

use crate::history::ClipboardHistory;
use crate::usecases::backfill_ocr::BackfillOcr;

/// Poll the clipboard and capture a new entry if its content changed.
///
/// # Behavior / 行为
/// - Returns immediately when the change counter did not move.
/// - The counter is recorded even when nothing is captured, so an
///   unrecognized change is not re-examined on the next poll.
/// - A previous occurrence of the same content is replaced and its star
///   carried over; the tail is evicted beyond capacity.
/// - New image entries get an OCR backfill task.
pub struct CaptureClipboardChange {
    history: Arc<ClipboardHistory>,
}

struct Captured {
    entry: ClipboardEntry,
    /// Image bytes handed to OCR once the entry is stored.
    ocr_source: Option<Bytes>,
}

impl CaptureClipboardChange {
    pub fn new(history: Arc<ClipboardHistory>) -> Self {
        Self { history }
    }

    /// Returns the id of the inserted entry, if any.
    pub async fn execute(&self) -> Option<EntryId> {
        let clipboard = &self.history.deps().clipboard;

        let mut state = self.history.lock().await;
        let change_count = clipboard.change_count();
        if change_count == state.last_change_count {
            return None;
        }
        state.last_change_count = change_count;

        let span = info_span!("usecase.capture_clipboard.execute", change_count);
        let captured = span.in_scope(|| self.classify_change())?;

        let entry_id = captured.entry.id().clone();
        let entry_type = captured.entry.entry_type();
        let outcome = state.store.insert(captured.entry);
        drop(state);

        span.in_scope(|| {
            info!(
                entry_id = %entry_id,
                kind = ?entry_type,
                replaced = outcome.replaced.is_some(),
                evicted = outcome.evicted.len(),
                "Captured clipboard entry"
            );
        });

        if let Some(image_bytes) = captured.ocr_source {
            BackfillOcr::spawn(&self.history, entry_id.clone(), image_bytes);
        }
        self.history.notify();
        Some(entry_id)
    }

    fn classify_change(&self) -> Option<Captured> {
        let clipboard = &self.history.deps().clipboard;
        let formats = match clipboard.available_formats() {
            Ok(formats) => formats,
            Err(err) => {
                warn!(error = %err, "Failed to list clipboard formats");
                return None;
            }
        };
        let now = self.history.deps().clock.now();

        if let Some(captured) = self.capture_image(&formats, now) {
            return Some(captured);
        }
        if let Some(entry) = self.capture_file_url(&formats, now) {
            return Some(Captured {
                entry,
                ocr_source: None,
            });
        }
        if let Some(entry) = self.capture_text(&formats, now) {
            return Some(Captured {
                entry,
                ocr_source: None,
            });
        }

        debug!(formats = formats.len(), "Clipboard change produced no entry");
        None
    }

    fn capture_image(&self, formats: &[ClipboardFormat], now: DateTime<Utc>) -> Option<Captured> {
        let deps = self.history.deps();
        let max_bytes = self.history.config().max_image_bytes;

        for format in ClipboardFormat::image_candidates() {
            if !formats.contains(&format) {
                continue;
            }
            let bytes = match deps.clipboard.read_bytes(&format) {
                Ok(Some(bytes)) => bytes,
                Ok(None) => continue,
                Err(err) => {
                    warn!(format = %format, error = %err, "Failed to read clipboard image");
                    continue;
                }
            };
            if bytes.len() > max_bytes {
                debug!(
                    format = %format,
                    size_bytes = bytes.len(),
                    max_bytes,
                    "Skipping oversized clipboard image"
                );
                continue;
            }
            if let Err(err) = deps.image_decoder.decode(&bytes) {
                debug!(format = %format, error = %err, "Skipping undecodable clipboard image");
                continue;
            }
            let hash = match deps.hasher.hash_bytes(&bytes) {
                Ok(hash) => hash,
                Err(err) => {
                    warn!(format = %format, error = %err, "Failed to hash clipboard image");
                    continue;
                }
            };

            let image_bytes = Bytes::from(bytes);
            return Some(Captured {
                entry: ClipboardEntry::image(image_bytes.clone(), hash, now),
                ocr_source: Some(image_bytes),
            });
        }
        None
    }

    fn capture_file_url(
        &self,
        formats: &[ClipboardFormat],
        now: DateTime<Utc>,
    ) -> Option<ClipboardEntry> {
        let format = ClipboardFormat::file_url();
        if !formats.contains(&format) {
            return None;
        }
        let raw = match self.history.deps().clipboard.read_string(&format) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(error = %err, "Failed to read clipboard file URL");
                return None;
            }
        };
        match FileUrl::parse(&raw) {
            Some(url) => Some(ClipboardEntry::from_file_url(url, now)),
            None => {
                debug!("Clipboard file URL did not parse; falling back to text");
                None
            }
        }
    }

    fn capture_text(
        &self,
        formats: &[ClipboardFormat],
        now: DateTime<Utc>,
    ) -> Option<ClipboardEntry> {
        let clipboard = &self.history.deps().clipboard;
        let text = match clipboard.read_string(&ClipboardFormat::text_plain()) {
            Ok(text) => text?,
            Err(err) => {
                warn!(error = %err, "Failed to read clipboard text");
                return None;
            }
        };
        if text.trim().is_empty() {
            debug!("Discarding whitespace-only clipboard text");
            return None;
        }

        if has_concealed_marker(formats) || is_password_like(&text) {
            let ttl = self.history.config().password_ttl();
            return Some(ClipboardEntry::password(text, now, ttl));
        }

        let mut pasteboard_data = BTreeMap::new();
        for format in ClipboardFormat::rich_text_formats() {
            if !formats.contains(&format) {
                continue;
            }
            match clipboard.read_bytes(&format) {
                Ok(Some(bytes)) => {
                    pasteboard_data.insert(format, bytes);
                }
                Ok(None) => {}
                Err(err) => debug!(format = %format, error = %err, "Skipping rich representation"),
            }
        }
        Some(ClipboardEntry::text(text, now, pasteboard_data))
    }
}
