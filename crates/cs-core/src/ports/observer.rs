/// Single-subscriber "entries changed" signal.
///
/// Invoked after every store mutation, outside the store lock. The signal
/// carries no payload; receivers re-read the entry list.
pub trait HistoryObserverPort: Send + Sync {
    fn entries_changed(&self);
}

/// Observer that ignores every notification.
pub struct NoopObserver;

impl HistoryObserverPort for NoopObserver {
    fn entries_changed(&self) {}
}
