use std::sync::Arc;

use tracing::{info, info_span};

use crate::history::ClipboardHistory;

/// Remove expired (password) entries, notifying once if any were removed.
pub struct SweepExpiredEntries {
    history: Arc<ClipboardHistory>,
}

impl SweepExpiredEntries {
    pub fn new(history: Arc<ClipboardHistory>) -> Self {
        Self { history }
    }

    /// Returns the number of removed entries.
    pub async fn execute(&self) -> usize {
        let now = self.history.deps().clock.now();
        let removed = self.history.lock().await.store.remove_expired(now);

        if removed > 0 {
            info_span!("usecase.sweep_expired.execute").in_scope(|| {
                info!(removed, "Removed expired entries");
            });
            self.history.notify();
        }
        removed
    }
}
