//! attentiond
//!
//! Replays or streams head-tracker frames through the attention engine and
//! publishes the resulting events to OSC clients.

pub mod cli;
pub mod logging;
pub mod replay;
pub mod runner;
pub mod settings;

pub use cli::Cli;
pub use logging::init_logging;
pub use replay::{FrameSource, ReplaySource};
pub use runner::{build_pipeline, run, Pipeline};
pub use settings::AppConfig;
