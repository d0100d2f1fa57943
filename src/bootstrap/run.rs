//! Foreground run loop.
//!
//! Starts the monitor, follows history changes until Ctrl-C, then stops the
//! monitor and lets in-flight OCR settle.

use std::sync::Arc;

use cs_app::{ChannelObserver, ClipboardHistory, HistoryMonitor};
use cs_core::{ClipboardEntry, EntryType};
use cs_infra::ThumbnailCache;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::config::AppConfig;
use super::wiring::{build_history, create_thumbnail_cache};

const PREVIEW_CHARS: usize = 60;

pub async fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let (observer, changes) = ChannelObserver::new();
    let history = build_history(&config, Arc::new(observer))?;
    let thumbnails = Arc::new(create_thumbnail_cache(&config));

    let monitor = HistoryMonitor::new(history.clone());
    monitor.start()?;
    info!(
        capacity = config.history.capacity,
        poll_interval_ms = config.history.poll_interval_ms,
        "Clipboard history running, press Ctrl-C to stop"
    );

    let follower = tokio::spawn(follow_changes(history.clone(), thumbnails, changes));

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    monitor.stop();
    follower.abort();
    history.wait_for_pending_ocr().await;
    info!(entries = history.len().await, "Clipboard history stopped");
    Ok(())
}

async fn follow_changes(
    history: Arc<ClipboardHistory>,
    thumbnails: Arc<ThumbnailCache>,
    mut changes: watch::Receiver<u64>,
) {
    while changes.changed().await.is_ok() {
        let generation = *changes.borrow_and_update();
        let entries = history.entries().await;
        thumbnails.retain(entries.iter().map(ClipboardEntry::id)).await;

        let Some(head) = entries.first() else {
            debug!(generation, "History is empty");
            continue;
        };
        if head.entry_type() == EntryType::Image {
            match thumbnails.get_or_generate(head).await {
                Ok(Some(thumbnail)) => debug!(
                    entry_id = %head.id(),
                    width = thumbnail.thumbnail.width,
                    height = thumbnail.thumbnail.height,
                    "Thumbnail ready"
                ),
                Ok(None) => {}
                Err(err) => warn!(entry_id = %head.id(), error = %err, "Thumbnail generation failed"),
            }
        }
        // display_content masks password entries
        info!(
            generation,
            entries = entries.len(),
            kind = ?head.entry_type(),
            starred = head.is_starred(),
            preview = %head.preview(PREVIEW_CHARS),
            "History changed"
        );
    }
}
