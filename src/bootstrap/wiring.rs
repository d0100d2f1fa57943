//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on cs-infra, cs-platform and cs-app at the
//! same time. Assembly only: configuration was loaded in `config.rs` and is
//! validated when the history is constructed.

use std::sync::Arc;

use cs_app::{ClipboardHistory, HistoryDeps};
use cs_core::config::ConfigError;
use cs_core::ports::{HistoryObserverPort, OcrPort};
use cs_infra::{ImageCrateDecoder, InfraThumbnailGenerator, Sha256Hasher, SystemClock, ThumbnailCache};
use cs_platform::{DisabledOcr, RsSystemClipboard, TesseractOcr};
use tracing::info;

use super::config::{AppConfig, OcrConfig, OcrEngine};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInit(String),

    #[error("Invalid history configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Select the OCR adapter named by the configuration.
pub fn create_ocr(config: &OcrConfig) -> Arc<dyn OcrPort> {
    match config.engine {
        OcrEngine::Tesseract => {
            info!(binary = %config.binary.display(), language = %config.language, "Using tesseract OCR");
            Arc::new(TesseractOcr::new(config.binary.clone(), config.language.clone()))
        }
        OcrEngine::None => {
            info!("OCR disabled");
            Arc::new(DisabledOcr)
        }
    }
}

/// Wire all history dependencies
/// 连接所有历史记录依赖
///
/// # Errors / 错误
///
/// Returns `WiringError::ClipboardInit` when the system clipboard cannot be
/// opened.
pub fn wire_dependencies(
    config: &AppConfig,
    observer: Arc<dyn HistoryObserverPort>,
) -> WiringResult<HistoryDeps> {
    let clipboard = RsSystemClipboard::new()
        .map_err(|e| WiringError::ClipboardInit(format!("Failed to create clipboard: {}", e)))?;

    Ok(HistoryDeps {
        clipboard: Arc::new(clipboard),
        ocr: create_ocr(&config.ocr),
        observer,
        hasher: Arc::new(Sha256Hasher),
        image_decoder: Arc::new(ImageCrateDecoder),
        clock: Arc::new(SystemClock),
    })
}

/// Build the history over the wired dependencies.
pub fn build_history(
    config: &AppConfig,
    observer: Arc<dyn HistoryObserverPort>,
) -> WiringResult<Arc<ClipboardHistory>> {
    // fail on bad config before touching the clipboard
    config.history.validate()?;
    let deps = wire_dependencies(config, observer)?;
    Ok(ClipboardHistory::new(deps, config.history.clone())?)
}

/// Thumbnail cache sized by the history configuration.
pub fn create_thumbnail_cache(config: &AppConfig) -> ThumbnailCache {
    ThumbnailCache::new(Arc::new(InfraThumbnailGenerator::new(
        config.history.thumbnail_max_edge,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use cs_core::ports::NoopObserver;
    use cs_core::HistoryConfig;

    #[test]
    fn test_wiring_error_display() {
        let err = WiringError::ClipboardInit("platform error".to_string());
        assert_eq!(err.to_string(), "Clipboard initialization failed: platform error");
    }

    #[test]
    fn test_wiring_error_from_config_error() {
        let err: WiringError = ConfigError::ZeroCapacity.into();
        assert!(matches!(err, WiringError::InvalidConfig(ConfigError::ZeroCapacity)));
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn test_build_history_rejects_invalid_config_before_clipboard() {
        let config = AppConfig {
            history: HistoryConfig {
                capacity: 0,
                ..HistoryConfig::default()
            },
            ..AppConfig::default()
        };

        let result = build_history(&config, Arc::new(NoopObserver));

        assert!(matches!(result, Err(WiringError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_create_ocr_disabled_returns_no_lines() {
        let config = OcrConfig {
            engine: OcrEngine::None,
            ..OcrConfig::default()
        };

        let ocr = create_ocr(&config);
        let lines = ocr.recognize(Bytes::from_static(b"not an image")).await.unwrap();

        assert!(lines.is_empty());
    }
}
