//! Application layer of clipstash.
//!
//! [`ClipboardHistory`] owns the entry store and is the single point through
//! which every mutation passes. Use cases in [`usecases`] operate on a shared
//! `Arc<ClipboardHistory>`; [`HistoryMonitor`] drives the two periodic tasks
//! (clipboard polling and expiry sweep).

pub mod deps;
pub mod history;
pub mod monitor;
pub mod observer;
pub mod store;
pub mod usecases;

pub use deps::HistoryDeps;
pub use history::ClipboardHistory;
pub use monitor::{HistoryMonitor, MonitorError};
pub use observer::ChannelObserver;
pub use store::EntryStore;
pub use usecases::UseCases;
