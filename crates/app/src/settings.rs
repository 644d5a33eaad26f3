//! Layered application configuration
//!
//! Later layers win: built-in defaults, then the `--config` file, then
//! `ATTENTIOND__*` environment variables, then command line flags.

use attention::AttentionConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, Source};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Cli;

pub const ENV_PREFIX: &str = "ATTENTIOND";

/// Daemon configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Screen definition file
    pub screens: PathBuf,

    /// Tracker recording (JSON lines), `-` for stdin
    pub frames: Option<PathBuf>,

    /// OSC clients as `host:port`
    pub osc_clients: Vec<String>,

    /// Ports to listen on for OSC control messages
    pub osc_listeners: Vec<u16>,

    /// Publish gaze intersection coordinates
    pub send_gaze: bool,

    /// Pause between replayed frames (ms), 0 for as fast as possible
    pub frame_interval_ms: u64,

    pub attention: AttentionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            screens: PathBuf::from("screens.toml"),
            frames: None,
            osc_clients: Vec::new(),
            osc_listeners: Vec::new(),
            send_gaze: false,
            frame_interval_ms: 33,
            attention: AttentionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load every layer for this command line
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = cli
            .config
            .as_ref()
            .map(|path| File::from(path.as_path()).required(true));
        Self::layered(file, environment(), cli)
    }

    /// Build from explicit file and environment layers plus CLI overrides
    pub fn layered<F>(file: Option<F>, env: Environment, cli: &Cli) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        builder = builder.add_source(env);
        builder = apply_cli(builder, cli)?;

        builder.build()?.try_deserialize()
    }
}

/// `ATTENTIOND__SEND_GAZE=true`, `ATTENTIOND__ATTENTION__STABILIZER_WINDOW=5`,
/// `ATTENTIOND__OSC_CLIENTS=127.0.0.1:9000,10.0.0.2:9000`
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("osc_clients")
        .with_list_parse_key("osc_listeners")
        .try_parsing(true)
}

fn apply_cli(
    mut builder: ConfigBuilder<DefaultState>,
    cli: &Cli,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(screens) = &cli.screens {
        builder = builder.set_override("screens", screens.to_string_lossy().into_owned())?;
    }
    if let Some(frames) = &cli.frames {
        builder = builder.set_override("frames", frames.to_string_lossy().into_owned())?;
    }
    if !cli.osc_clients.is_empty() {
        builder = builder.set_override("osc_clients", cli.osc_clients.clone())?;
    }
    if !cli.osc_listeners.is_empty() {
        let ports: Vec<i64> = cli.osc_listeners.iter().map(|p| i64::from(*p)).collect();
        builder = builder.set_override("osc_listeners", ports)?;
    }
    if cli.send_gaze {
        builder = builder.set_override("send_gaze", true)?;
    }
    if let Some(interval) = cli.frame_interval_ms {
        builder = builder.set_override("frame_interval_ms", interval)?;
    }
    Ok(builder)
}
