//! Command line

use clap::Parser;
use std::path::PathBuf;

/// attentiond - which screen is everyone looking at
#[derive(Debug, Parser, Default)]
#[command(name = "attentiond")]
#[command(version)]
#[command(about = "Track head-pose attention towards screens and publish it over OSC", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Screen definition file
    #[arg(short, long)]
    pub screens: Option<PathBuf>,

    /// Tracker recording to replay, one JSON frame per line (use - for stdin)
    #[arg(short, long)]
    pub frames: Option<PathBuf>,

    /// OSC client to publish to, as host:port (repeatable)
    #[arg(long = "osc-client", value_name = "HOST:PORT")]
    pub osc_clients: Vec<String>,

    /// UDP port to listen on for OSC control messages (repeatable)
    #[arg(long = "osc-listen", value_name = "PORT")]
    pub osc_listeners: Vec<u16>,

    /// Also publish gaze/screen intersection coordinates
    #[arg(long)]
    pub send_gaze: bool,

    /// Pause between replayed frames (ms)
    #[arg(long, value_name = "MS")]
    pub frame_interval_ms: Option<u64>,

    /// Validate configuration and screens, then exit
    #[arg(long)]
    pub check: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
