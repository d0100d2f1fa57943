use std::sync::Arc;

use cs_core::search::filter_entries;
use cs_core::ClipboardEntry;
use tracing::debug;

use crate::history::ClipboardHistory;

/// Fuzzy search over the current history.
///
/// Starred matches come first, each group ordered by descending score.
/// Password entries never match a non-empty query.
pub struct SearchEntries {
    history: Arc<ClipboardHistory>,
}

impl SearchEntries {
    pub fn new(history: Arc<ClipboardHistory>) -> Self {
        Self { history }
    }

    pub async fn execute(&self, query: &str) -> Vec<ClipboardEntry> {
        let entries = self.history.entries().await;
        let results = filter_entries(&entries, query);
        debug!(
            query_chars = query.chars().count(),
            total = entries.len(),
            matched = results.len(),
            "Searched history"
        );
        results
    }
}
