//! OCR through the `tesseract` command-line tool.
//!
//! Image bytes are streamed to `tesseract stdin stdout`, so nothing touches
//! the filesystem. Recognized text is split into trimmed, non-empty lines.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use cs_core::ports::OcrPort;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, debug_span, Instrument};

pub const DEFAULT_TESSERACT_BINARY: &str = "tesseract";
pub const DEFAULT_LANGUAGE: &str = "eng";

#[derive(Debug, Error)]
pub enum TesseractError {
    #[error("failed to launch {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to exchange data with tesseract: {0}")]
    Io(#[from] std::io::Error),
    #[error("tesseract exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

pub struct TesseractOcr {
    binary: PathBuf,
    language: String,
}

impl TesseractOcr {
    pub fn new(binary: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }

    async fn run(&self, image_bytes: &[u8]) -> Result<String, TesseractError> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TesseractError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(image_bytes).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(TesseractError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new(DEFAULT_TESSERACT_BINARY, DEFAULT_LANGUAGE)
    }
}

#[async_trait]
impl OcrPort for TesseractOcr {
    async fn recognize(&self, image_bytes: Bytes) -> Result<Vec<String>> {
        let span = debug_span!(
            "platform.ocr.tesseract",
            size_bytes = image_bytes.len(),
            language = %self.language,
        );
        async move {
            let stdout = self.run(&image_bytes).await?;
            let lines = recognized_lines(&stdout);
            debug!(lines = lines.len(), "Tesseract finished");
            Ok(lines)
        }
        .instrument(span)
        .await
    }
}

fn recognized_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
