//! # History configuration
//!
//! Tunables of the capture engine. The values are passed in explicitly by
//! whoever builds the history; nothing here reads global state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPACITY: usize = 50;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_PASSWORD_TTL_SECS: u64 = 60;
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_THUMBNAIL_MAX_EDGE: u32 = 128;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("history capacity must be at least 1")]
    ZeroCapacity,

    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("thumbnail_max_edge must be greater than zero")]
    ZeroThumbnailEdge,
}

/// Capture engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of retained entries.
    pub capacity: usize,
    /// Clipboard change-counter poll period.
    pub poll_interval_ms: u64,
    /// Password expiry sweep period.
    pub sweep_interval_secs: u64,
    /// Lifetime of password entries.
    pub password_ttl_secs: u64,
    /// Image representations larger than this are skipped.
    pub max_image_bytes: usize,
    /// Longest edge of generated thumbnails.
    pub thumbnail_max_edge: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            password_ttl_secs: DEFAULT_PASSWORD_TTL_SECS,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            thumbnail_max_edge: DEFAULT_THUMBNAIL_MAX_EDGE,
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("poll_interval_ms"));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval("sweep_interval_secs"));
        }
        if self.thumbnail_max_edge == 0 {
            return Err(ConfigError::ZeroThumbnailEdge);
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn password_ttl(&self) -> chrono::Duration {
        // chrono::Duration::seconds panics outside its range
        chrono::Duration::seconds(self.password_ttl_secs.min(u64::from(u32::MAX)) as i64)
    }
}
