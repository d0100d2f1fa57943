//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML configuration file into [`AppConfig`]. Pure data loading:
//! missing keys fall back to their defaults, validation happens when the
//! history is constructed.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cs_core::HistoryConfig;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub history: HistoryConfig,
    pub ocr: OcrConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngine {
    #[default]
    Tesseract,
    None,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub engine: OcrEngine,
    /// Tesseract language code(s), e.g. `eng` or `eng+deu`.
    pub language: String,
    pub binary: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: OcrEngine::Tesseract,
            language: "eng".to_string(),
            binary: PathBuf::from("tesseract"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for `clipstash.log`; stdout only when unset.
    pub directory: Option<PathBuf>,
}

/// `<config dir>/clipstash/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clipstash").join(CONFIG_FILE_NAME))
}

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// A missing file yields the default configuration.
///
/// # Errors / 错误
///
/// Returns error if:
/// - File exists but cannot be read (I/O error)
/// - Content is not valid TOML or does not match the expected shape
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content).context("Failed to parse config as TOML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_config(
            r#"
            [history]
            capacity = 20
            poll_interval_ms = 250

            [ocr]
            engine = "none"
            language = "deu"

            [logging]
            directory = "/var/log/clipstash"
        "#,
        );

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.history.capacity, 20);
        assert_eq!(config.history.poll_interval_ms, 250);
        assert_eq!(config.history.sweep_interval_secs, 5);
        assert_eq!(config.ocr.engine, OcrEngine::None);
        assert_eq!(config.ocr.language, "deu");
        assert_eq!(config.ocr.binary, PathBuf::from("tesseract"));
        assert_eq!(
            config.logging.directory,
            Some(PathBuf::from("/var/log/clipstash"))
        );
    }

    #[test]
    fn test_load_config_missing_sections_use_defaults() {
        let temp_file = write_config("[history]\n");

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = load_config(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_does_not_validate() {
        let temp_file = write_config("[history]\ncapacity = 0\n");

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.history.capacity, 0);
        assert!(config.history.validate().is_err());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let temp_file = write_config("[history\ncapacity = ");

        let err = load_config(temp_file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_load_config_rejects_unknown_engine() {
        let temp_file = write_config("[ocr]\nengine = \"vision\"\n");

        assert!(load_config(temp_file.path()).is_err());
    }
}
