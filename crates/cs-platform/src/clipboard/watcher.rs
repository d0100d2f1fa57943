use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clipboard_rs::{
    ClipboardHandler, ClipboardWatcher as RSClipboardWatcher, ClipboardWatcherContext,
    WatcherShutdown,
};
use tracing::{info, trace};

/// Clipboard change counter shared by the adapter and the native watcher.
///
/// A write made through the adapter advances the counter immediately. The
/// native notification it triggers later is swallowed, so one write counts
/// as exactly one change.
#[derive(Debug, Default)]
pub struct ChangeCounter {
    count: AtomicU64,
    /// Native notifications still expected for our own writes.
    pending_echoes: AtomicU64,
}

impl ChangeCounter {
    pub fn current(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    /// Count a write issued through the adapter.
    pub fn record_own_write(&self, expect_echo: bool) {
        if expect_echo {
            self.pending_echoes.fetch_add(1, Ordering::SeqCst);
        }
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    /// Count a native change notification unless it echoes our own write.
    /// Returns whether the counter advanced.
    pub fn record_native_change(&self) -> bool {
        let echo = self
            .pending_echoes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |pending| {
                pending.checked_sub(1)
            })
            .is_ok();
        if !echo {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
        !echo
    }
}

/// Native clipboard-change handler that feeds the shared change counter.
pub struct ChangeCountWatcher {
    counter: Arc<ChangeCounter>,
}

impl ChangeCountWatcher {
    pub fn new(counter: Arc<ChangeCounter>) -> Self {
        Self { counter }
    }
}

impl ClipboardHandler for ChangeCountWatcher {
    fn on_clipboard_change(&mut self) {
        let counted = self.counter.record_native_change();
        trace!(change_count = self.counter.current(), counted, "Native clipboard change");
    }
}

/// Start the native watcher on a dedicated thread.
///
/// The returned handle stops the watch loop; dropping it leaves the thread
/// running until process exit.
pub(crate) fn spawn_change_watcher(counter: Arc<ChangeCounter>) -> Result<WatcherShutdown> {
    let mut watcher_ctx = ClipboardWatcherContext::new()
        .map_err(|e| anyhow!("Failed to create watcher context: {}", e))?;
    let shutdown = watcher_ctx
        .add_handler(ChangeCountWatcher::new(counter))
        .get_shutdown_channel();

    std::thread::Builder::new()
        .name("clipboard-watcher".into())
        .spawn(move || {
            info!("start clipboard watch");
            watcher_ctx.start_watch();
            info!("clipboard watch stopped");
        })
        .context("spawn clipboard watcher thread")?;

    Ok(shutdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_counts_external_changes() {
        let counter = Arc::new(ChangeCounter::default());
        let mut handler = ChangeCountWatcher::new(counter.clone());

        handler.on_clipboard_change();
        handler.on_clipboard_change();

        assert_eq!(counter.current(), 2);
    }

    #[test]
    fn test_echo_of_own_write_is_not_counted_twice() {
        let counter = Arc::new(ChangeCounter::default());
        let mut handler = ChangeCountWatcher::new(counter.clone());

        counter.record_own_write(true);
        assert_eq!(counter.current(), 1);
        handler.on_clipboard_change();
        assert_eq!(counter.current(), 1);

        handler.on_clipboard_change();
        assert_eq!(counter.current(), 2);
    }

    #[test]
    fn test_own_write_without_watcher_expects_no_echo() {
        let counter = ChangeCounter::default();

        counter.record_own_write(false);

        assert_eq!(counter.current(), 1);
        assert!(counter.record_native_change());
        assert_eq!(counter.current(), 2);
    }
}
