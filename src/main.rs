use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

mod bootstrap;

use bootstrap::{default_config_path, init_tracing_subscriber, load_config, run_app, OcrEngine};

/// Clipboard history capture, classification and search.
#[derive(Debug, Parser)]
#[command(name = "clipstash", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable OCR of captured images.
    #[arg(long)]
    no_ocr: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .or_else(default_config_path)
        .context("No configuration directory available, pass --config")?;
    let mut config = load_config(&config_path)?;
    if cli.no_ocr {
        config.ocr.engine = OcrEngine::None;
    }

    init_tracing_subscriber(config.logging.directory.as_deref())?;
    info!(config = %config_path.display(), "Starting clipstash");

    run_app(config).await
}
