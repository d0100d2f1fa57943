//! Shared clipboard history context.
//!
//! All store mutations (capture, delete, star, edit, OCR backfill, expiry
//! sweep) take the same async mutex, which makes it the serialization point
//! of the engine. Observers are notified only after the guard is dropped.

use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use cs_core::config::ConfigError;
use cs_core::{ClipboardEntry, EntryId, HistoryConfig};
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::deps::HistoryDeps;
use crate::store::EntryStore;

pub(crate) struct HistoryState {
    pub store: EntryStore,
    /// Clipboard change counter seen by the last capture attempt.
    pub last_change_count: u64,
}

pub struct ClipboardHistory {
    state: Mutex<HistoryState>,
    deps: HistoryDeps,
    config: HistoryConfig,
    pending_ocr: StdMutex<Vec<JoinHandle<()>>>,
}

impl ClipboardHistory {
    /// Build the history context.
    ///
    /// The current clipboard change counter is recorded, so whatever is on
    /// the clipboard at construction time is not captured.
    pub fn new(deps: HistoryDeps, config: HistoryConfig) -> Result<Arc<Self>, ConfigError> {
        config.validate()?;
        let last_change_count = deps.clipboard.change_count();
        debug!(
            capacity = config.capacity,
            change_count = last_change_count,
            "Clipboard history created"
        );

        Ok(Arc::new(Self {
            state: Mutex::new(HistoryState {
                store: EntryStore::new(config.capacity),
                last_change_count,
            }),
            deps,
            config,
            pending_ocr: StdMutex::new(Vec::new()),
        }))
    }

    /// Newest-first snapshot of the history.
    pub async fn entries(&self) -> Vec<ClipboardEntry> {
        self.state.lock().await.store.entries().to_vec()
    }

    pub async fn entry(&self, id: &EntryId) -> Option<ClipboardEntry> {
        self.state.lock().await.store.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.store.is_empty()
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    pub(crate) fn deps(&self) -> &HistoryDeps {
        &self.deps
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().await
    }

    pub(crate) fn notify(&self) {
        self.deps.observer.entries_changed();
    }

    pub(crate) fn track_ocr(&self, handle: JoinHandle<()>) {
        let mut pending = self
            .pending_ocr
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        pending.retain(|task| !task.is_finished());
        pending.push(handle);
    }

    /// Wait until every OCR task spawned so far has finished.
    pub async fn wait_for_pending_ocr(&self) {
        loop {
            let handles: Vec<JoinHandle<()>> = {
                let mut pending = self
                    .pending_ocr
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                std::mem::take(&mut *pending)
            };
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(err) = handle.await {
                    debug!(error = %err, "OCR task ended abnormally");
                }
            }
        }
    }
}
