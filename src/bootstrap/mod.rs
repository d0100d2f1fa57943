//! Process assembly: configuration, tracing, dependency wiring and the
//! foreground run loop.

pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use self::config::{default_config_path, load_config, OcrEngine};
pub use self::run::run_app;
pub use self::tracing::init_tracing_subscriber;
