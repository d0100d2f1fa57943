use std::sync::Arc;

use cs_core::EntryId;
use tracing::info;

use crate::history::ClipboardHistory;

/// Replace the content of an entry, keeping id, timestamp and star.
pub struct UpdateEntryContent {
    history: Arc<ClipboardHistory>,
}

impl UpdateEntryContent {
    pub fn new(history: Arc<ClipboardHistory>) -> Self {
        Self { history }
    }

    #[tracing::instrument(
        name = "usecase.update_entry_content.execute",
        skip(self, new_content),
        fields(entry_id = %entry_id)
    )]
    pub async fn execute(&self, entry_id: &EntryId, new_content: String) -> bool {
        let updated = self
            .history
            .lock()
            .await
            .store
            .update(entry_id, |entry| entry.with_content(new_content));
        if updated {
            info!("Updated entry content");
            self.history.notify();
        }
        updated
    }
}
