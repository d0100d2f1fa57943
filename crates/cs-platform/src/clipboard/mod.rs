mod common;
mod format_map;
mod system;
mod watcher;

pub use format_map::canonical_format;
pub use system::RsSystemClipboard;
pub use watcher::ChangeCountWatcher;
