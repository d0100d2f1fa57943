use std::sync::Arc;

use tracing::info;

use crate::history::ClipboardHistory;

/// Remove every unstarred entry from the history.
pub struct ClearUnstarred {
    history: Arc<ClipboardHistory>,
}

impl ClearUnstarred {
    pub fn new(history: Arc<ClipboardHistory>) -> Self {
        Self { history }
    }

    #[tracing::instrument(name = "usecase.clear_unstarred.execute", skip(self))]
    pub async fn execute(&self) -> usize {
        let removed = self.history.lock().await.store.clear_unstarred();
        if removed > 0 {
            info!(removed, "Cleared unstarred entries");
            self.history.notify();
        }
        removed
    }
}
