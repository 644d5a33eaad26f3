//! attentiond - Main Entry Point

use anyhow::{Context, Result};
use attentiond::{build_pipeline, init_logging, run, AppConfig, Cli};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs)?;

    info!("=== attentiond v{} ===", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&cli).context("loading configuration")?;

    if cli.check {
        build_pipeline(&config)?;
        info!("Configuration OK");
        return Ok(());
    }

    run(config).await
}
