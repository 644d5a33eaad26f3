//! Frame loop: control input, engine update, OSC output

use anyhow::{bail, Context, Result};
use attention::{AttentionTracker, FrameReport, FrameSnapshot, InterestGauge};
use osc_bridge::{
    connection_test, event_message, gaze_message, ControlCommand, OscMessage, OscReceiver,
    OscSender,
};
use screen_registry::load_screens;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::replay::{FrameSource, ReplaySource};
use crate::settings::AppConfig;

/// Engine plus the OSC mapping for one frame. No I/O.
pub struct Pipeline {
    tracker: AttentionTracker,
    send_gaze: bool,
    frames: u64,
}

impl Pipeline {
    pub fn new(tracker: AttentionTracker, send_gaze: bool) -> Self {
        Self {
            tracker,
            send_gaze,
            frames: 0,
        }
    }

    pub fn tracker(&self) -> &AttentionTracker {
        &self.tracker
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn handle_command(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::ResetTimers => {
                info!("Content changed, resetting watch timers");
                self.tracker.request_timer_reset();
            }
        }
    }

    /// Run one frame and build the messages to publish, in event order
    pub fn step(&mut self, frame: &FrameSnapshot) -> (FrameReport, Vec<OscMessage>) {
        let report = self.tracker.update(frame);
        self.frames += 1;

        let mut messages: Vec<OscMessage> = report.events.iter().map(event_message).collect();
        if self.send_gaze {
            messages.extend(report.gaze.iter().filter_map(gaze_message));
        }

        for sample in &report.gaze {
            if let Some(state) = self.tracker.person(sample.person) {
                let gauge = InterestGauge::for_duration(state.watch_duration());
                debug!(
                    person = %sample.person,
                    screen = %sample.screen,
                    interest = %state.interest(),
                    fill = gauge.fill,
                    color = ?gauge.color,
                    "Interest gauge"
                );
            }
        }

        (report, messages)
    }
}

/// Load screens and build the engine
pub fn build_pipeline(config: &AppConfig) -> Result<Pipeline> {
    let registry = load_screens(&config.screens)
        .with_context(|| format!("loading screens from {}", config.screens.display()))?;
    let tracker = AttentionTracker::new(registry, config.attention.clone())
        .context("invalid attention configuration")?;
    Ok(Pipeline::new(tracker, config.send_gaze))
}

/// Replay frames until the source is exhausted or Ctrl-C
pub async fn run(config: AppConfig) -> Result<()> {
    let mut pipeline = build_pipeline(&config)?;

    let Some(frames_path) = config.frames.as_ref() else {
        bail!("no frame source configured (set `frames` or pass --frames)");
    };
    let mut source = ReplaySource::open(frames_path)
        .with_context(|| format!("opening frames {}", frames_path.display()))?;

    if config.osc_clients.is_empty() {
        warn!("No OSC client configured, events will only be logged");
    }
    let sender = OscSender::connect(&config.osc_clients)
        .await
        .context("setting up OSC sender")?;
    sender.send(&connection_test()).await?;

    if config.osc_listeners.is_empty() {
        warn!("No OSC listener configured, timer resets disabled");
    }
    let mut receiver = OscReceiver::bind(&config.osc_listeners).await;

    let interval = Duration::from_millis(config.frame_interval_ms);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(interval = ?interval, "Processing frames");
    loop {
        for command in receiver.poll_commands() {
            pipeline.handle_command(command);
        }

        let Some(frame) = source.next_frame() else {
            break;
        };
        let (report, messages) = pipeline.step(&frame);
        for event in &report.events {
            debug!(event = event.name(), ?event, "Attention event");
        }
        sender.send_all(&messages).await?;

        tokio::select! {
            _ = &mut shutdown => {
                info!("Interrupted");
                break;
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }

    info!(frames = pipeline.frames(), "Done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use attention::{AttentionConfig, TrackedPerson};
    use gaze::HeadRotation;
    use osc_bridge::OscType;
    use screen_registry::{parse_screens, PositionMm};
    use config::FileFormat;

    const SCREENS: &str = r#"
        [[Screen]]
        id = 1
        width = 1000.0
        height = 600.0
        resolutionX = 1920
        resolutionY = 1080
        [Screen.CamPosition]
        centerx = -1000.0
        centery = 0.0
        centerz = 0.0

        [[Screen]]
        id = 2
        width = 1000.0
        height = 600.0
        resolutionX = 1920
        resolutionY = 1080
        [Screen.CamPosition]
        centerx = 1000.0
        centery = 0.0
        centerz = 0.0
    "#;

    fn pipeline(send_gaze: bool) -> Pipeline {
        let registry = parse_screens(SCREENS, FileFormat::Toml).unwrap();
        let tracker = AttentionTracker::new(registry, AttentionConfig::default()).unwrap();
        Pipeline::new(tracker, send_gaze)
    }

    fn frame(ms: u64, x: f64) -> FrameSnapshot {
        FrameSnapshot::new(
            Duration::from_millis(ms),
            vec![TrackedPerson::visible(
                1,
                PositionMm::new(x, 0.0, 2000.0),
                HeadRotation::default(),
            )],
        )
    }

    fn addresses(messages: &[OscMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.addr.as_str()).collect()
    }

    #[test]
    fn test_first_frame_messages() {
        let mut p = pipeline(false);
        let (_, messages) = p.step(&frame(0, -1000.0));
        assert_eq!(
            addresses(&messages),
            vec![
                "/context/nbusers",
                "/context/user/screen",
                "/context/facetrackedusers"
            ]
        );
        assert_eq!(p.frames(), 1);
    }

    #[test]
    fn test_gaze_coordinates_when_enabled() {
        let mut p = pipeline(true);
        p.step(&frame(0, 1000.0));
        let (_, messages) = p.step(&frame(33, 1000.0));
        assert_eq!(addresses(&messages), vec!["/context/user/coordinates"]);
        assert_eq!(messages[0].args[1], OscType::Float(2.0));
    }

    #[test]
    fn test_reset_command_restarts_interest() {
        let mut p = pipeline(false);
        p.step(&frame(0, -1000.0));
        let (_, messages) = p.step(&frame(2000, -1000.0));
        assert_eq!(addresses(&messages), vec!["/context/user/attention"]);

        p.handle_command(ControlCommand::ResetTimers);
        let (report, messages) = p.step(&frame(2100, -1000.0));
        assert_eq!(addresses(&messages), vec!["/context/user/attention"]);
        assert_eq!(messages[0].args[2], OscType::Float(0.0));
        assert_eq!(report.timestamp, Duration::from_millis(2100));
    }

    #[test]
    fn test_missing_screens_file_is_fatal() {
        let config = AppConfig {
            screens: "/nonexistent/screens.toml".into(),
            ..Default::default()
        };
        assert!(build_pipeline(&config).is_err());
    }

    #[tokio::test]
    async fn test_run_requires_frames() {
        let dir = std::env::temp_dir().join(format!("attentiond-run-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let screens = dir.join("screens.toml");
        std::fs::write(&screens, SCREENS).unwrap();

        let config = AppConfig {
            screens,
            frames: None,
            ..Default::default()
        };
        let err = run(config).await.unwrap_err();
        assert!(err.to_string().contains("no frame source"));
    }
}
