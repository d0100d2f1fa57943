//! Business logic use cases
//!
//! ```text
//! HistoryMonitor (poll tick)  -> CaptureClipboardChange -> BackfillOcr (task)
//! HistoryMonitor (sweep tick) -> SweepExpiredEntries
//! presentation layer          -> DeleteEntry / UpdateEntryContent / ToggleStar
//!                                ClearUnstarred / SearchEntries
//!                                RestoreClipboardSelection
//! ```

use std::sync::Arc;

use crate::history::ClipboardHistory;

pub mod backfill_ocr;
pub mod capture_clipboard;
pub mod clear_unstarred;
pub mod delete_entry;
pub mod restore_selection;
pub mod search_entries;
pub mod sweep_expired;
pub mod toggle_star;
pub mod update_entry_content;

pub use backfill_ocr::BackfillOcr;
pub use capture_clipboard::CaptureClipboardChange;
pub use clear_unstarred::ClearUnstarred;
pub use delete_entry::DeleteEntry;
pub use restore_selection::{RestoreClipboardSelection, RestoreFormat};
pub use search_entries::SearchEntries;
pub use sweep_expired::SweepExpiredEntries;
pub use toggle_star::ToggleStar;
pub use update_entry_content::UpdateEntryContent;

/// Accessor that builds use cases over one shared history.
#[derive(Clone)]
pub struct UseCases {
    history: Arc<ClipboardHistory>,
}

impl UseCases {
    pub fn new(history: Arc<ClipboardHistory>) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &Arc<ClipboardHistory> {
        &self.history
    }

    pub fn capture_clipboard(&self) -> CaptureClipboardChange {
        CaptureClipboardChange::new(self.history.clone())
    }

    pub fn backfill_ocr(&self) -> BackfillOcr {
        BackfillOcr::new(self.history.clone())
    }

    pub fn sweep_expired(&self) -> SweepExpiredEntries {
        SweepExpiredEntries::new(self.history.clone())
    }

    pub fn delete_entry(&self) -> DeleteEntry {
        DeleteEntry::new(self.history.clone())
    }

    pub fn update_entry_content(&self) -> UpdateEntryContent {
        UpdateEntryContent::new(self.history.clone())
    }

    pub fn toggle_star(&self) -> ToggleStar {
        ToggleStar::new(self.history.clone())
    }

    pub fn clear_unstarred(&self) -> ClearUnstarred {
        ClearUnstarred::new(self.history.clone())
    }

    pub fn search(&self) -> SearchEntries {
        SearchEntries::new(self.history.clone())
    }

    pub fn restore_selection(&self) -> RestoreClipboardSelection {
        RestoreClipboardSelection::new(self.history.clone())
    }
}
