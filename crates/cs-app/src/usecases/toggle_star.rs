use std::sync::Arc;

use cs_core::EntryId;
use tracing::info;

use crate::history::ClipboardHistory;

pub struct ToggleStar {
    history: Arc<ClipboardHistory>,
}

impl ToggleStar {
    pub fn new(history: Arc<ClipboardHistory>) -> Self {
        Self { history }
    }

    /// Flip the star of an entry. Returns the new state, or `None` when the
    /// id is unknown.
    #[tracing::instrument(name = "usecase.toggle_star.execute", skip(self), fields(entry_id = %entry_id))]
    pub async fn execute(&self, entry_id: &EntryId) -> Option<bool> {
        let starred = {
            let mut state = self.history.lock().await;
            let starred = !state.store.get(entry_id)?.is_starred();
            state
                .store
                .update(entry_id, |entry| entry.with_starred(starred));
            starred
        };
        info!(starred, "Toggled star");
        self.history.notify();
        Some(starred)
    }
}
