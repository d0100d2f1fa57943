use std::sync::Arc;

use cs_core::EntryId;
use tracing::info;

use crate::history::ClipboardHistory;

/// Delete one entry. No-op when the id is unknown.
pub struct DeleteEntry {
    history: Arc<ClipboardHistory>,
}

impl DeleteEntry {
    pub fn new(history: Arc<ClipboardHistory>) -> Self {
        Self { history }
    }

    #[tracing::instrument(name = "usecase.delete_entry.execute", skip(self), fields(entry_id = %entry_id))]
    pub async fn execute(&self, entry_id: &EntryId) -> bool {
        let removed = self.history.lock().await.store.remove(entry_id);
        if removed.is_none() {
            return false;
        }
        info!("Deleted clipboard entry");
        self.history.notify();
        true
    }
}
