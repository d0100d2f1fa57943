//! Periodic drivers of the history: clipboard polling and expiry sweep.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::history::ClipboardHistory;
use crate::usecases::{CaptureClipboardChange, SweepExpiredEntries};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonitorError {
    #[error("monitor must be started from within a Tokio runtime")]
    NoRuntime,
}

struct MonitorTasks {
    poll: AbortHandle,
    sweep: AbortHandle,
}

/// Runs the poll and sweep loops for one [`ClipboardHistory`].
///
/// # Behavior / 行为
/// - `start` and `stop` are idempotent.
/// - `stop` aborts both loops; OCR tasks already in flight keep running and
///   apply (or drop) their result as usual.
/// - Dropping the monitor stops it.
pub struct HistoryMonitor {
    history: Arc<ClipboardHistory>,
    tasks: Mutex<Option<MonitorTasks>>,
}

impl HistoryMonitor {
    pub fn new(history: Arc<ClipboardHistory>) -> Self {
        Self {
            history,
            tasks: Mutex::new(None),
        }
    }

    pub fn start(&self) -> Result<(), MonitorError> {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        if tasks.is_some() {
            debug!("History monitor already running");
            return Ok(());
        }
        let runtime = Handle::try_current().map_err(|_| MonitorError::NoRuntime)?;

        let config = self.history.config();
        let capture = CaptureClipboardChange::new(self.history.clone());
        let mut poll_ticker = ticker(config.poll_interval());
        let poll = runtime.spawn(async move {
            loop {
                poll_ticker.tick().await;
                capture.execute().await;
            }
        });

        let sweep_expired = SweepExpiredEntries::new(self.history.clone());
        let mut sweep_ticker = ticker(config.sweep_interval());
        let sweep = runtime.spawn(async move {
            loop {
                sweep_ticker.tick().await;
                sweep_expired.execute().await;
            }
        });

        *tasks = Some(MonitorTasks {
            poll: poll.abort_handle(),
            sweep: sweep.abort_handle(),
        });
        info!(
            poll_interval_ms = config.poll_interval_ms,
            sweep_interval_secs = config.sweep_interval_secs,
            "History monitor started"
        );
        Ok(())
    }

    pub fn stop(&self) {
        let tasks = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(tasks) = tasks {
            tasks.poll.abort();
            tasks.sweep.abort();
            info!("History monitor stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Drop for HistoryMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}
