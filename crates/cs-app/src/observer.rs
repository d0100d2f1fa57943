use cs_core::ports::HistoryObserverPort;
use tokio::sync::watch;

/// Forwards "entries changed" into a `watch` channel.
///
/// The channel value is a generation counter bumped on every notification,
/// so async consumers can `changed().await` and then re-read the entries.
pub struct ChannelObserver {
    sender: watch::Sender<u64>,
}

impl ChannelObserver {
    pub fn new() -> (Self, watch::Receiver<u64>) {
        let (sender, receiver) = watch::channel(0);
        (Self { sender }, receiver)
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }

    pub fn generation(&self) -> u64 {
        *self.sender.borrow()
    }
}

impl HistoryObserverPort for ChannelObserver {
    fn entries_changed(&self) {
        self.sender.send_modify(|generation| *generation += 1);
    }
}
