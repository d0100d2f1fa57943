use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use clipboard_rs::{ClipboardContext, WatcherShutdown};
use cs_core::ports::SystemClipboardPort;
use cs_core::{ClipboardFormat, ClipboardWriteItem};
use tracing::{debug, debug_span, warn};

use super::common::CommonClipboardImpl;
use super::watcher::{spawn_change_watcher, ChangeCounter};

/// System clipboard backed by `clipboard-rs`.
///
/// The change counter starts at zero and advances once per external change
/// and once per write issued through this adapter.
pub struct RsSystemClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
    change_count: Arc<ChangeCounter>,
    watcher: Mutex<Option<WatcherShutdown>>,
    watching: bool,
}

impl RsSystemClipboard {
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow!("Failed to create clipboard context: {}", e))?;
        let change_count = Arc::new(ChangeCounter::default());

        // Without a native watcher only our own writes advance the counter.
        let watcher = match spawn_change_watcher(change_count.clone()) {
            Ok(shutdown) => Some(shutdown),
            Err(err) => {
                warn!(error = %err, "Clipboard watcher unavailable");
                None
            }
        };

        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
            change_count,
            watching: watcher.is_some(),
            watcher: Mutex::new(watcher),
        })
    }

    fn context(&self) -> Result<MutexGuard<'_, ClipboardContext>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("clipboard context mutex poisoned"))
    }

    fn bump(&self) {
        self.change_count.record_own_write(self.watching);
    }
}

impl SystemClipboardPort for RsSystemClipboard {
    fn change_count(&self) -> u64 {
        self.change_count.current()
    }

    fn available_formats(&self) -> Result<Vec<ClipboardFormat>> {
        let ctx = self.context()?;
        CommonClipboardImpl::available_formats(&ctx)
    }

    fn read_string(&self, format: &ClipboardFormat) -> Result<Option<String>> {
        let ctx = self.context()?;
        CommonClipboardImpl::read_string(&ctx, format)
    }

    fn read_bytes(&self, format: &ClipboardFormat) -> Result<Option<Vec<u8>>> {
        let span = debug_span!("platform.clipboard.read_bytes", format = %format);
        span.in_scope(|| {
            let ctx = self.context()?;
            let bytes = CommonClipboardImpl::read_bytes(&ctx, format)?;
            debug!(size_bytes = bytes.as_ref().map(Vec::len), "Read clipboard bytes");
            Ok(bytes)
        })
    }

    fn write_string(&self, text: &str) -> Result<()> {
        let ctx = self.context()?;
        CommonClipboardImpl::write_text(&ctx, text)?;
        self.bump();
        Ok(())
    }

    fn write_objects(&self, items: Vec<ClipboardWriteItem>) -> Result<()> {
        let span = debug_span!("platform.clipboard.write_objects", items = items.len());
        span.in_scope(|| {
            let ctx = self.context()?;
            CommonClipboardImpl::write_items(&ctx, items)?;
            self.bump();
            debug!("Wrote clipboard items to system");
            Ok(())
        })
    }

    fn clear(&self) -> Result<()> {
        let ctx = self.context()?;
        CommonClipboardImpl::clear(&ctx)?;
        self.bump();
        Ok(())
    }
}

impl Drop for RsSystemClipboard {
    fn drop(&mut self) {
        let watcher = match self.watcher.get_mut() {
            Ok(watcher) => watcher.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(shutdown) = watcher {
            shutdown.stop();
        }
    }
}
