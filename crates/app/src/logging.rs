//! Tracing subscriber setup

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Log level for a `-v` count
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber, plain text or JSON lines
pub fn init_logging(verbosity: u8, json: bool) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level_for(verbosity))
        .with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
