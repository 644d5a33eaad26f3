//! Screen configuration loading
//!
//! One `Screen` record per physical screen, optionally wrapped in a
//! `RoomConfig` table:
//!
//! ```toml
//! [[Screen]]
//! id = 1
//! width = 1000.0
//! height = 600.0
//! resolutionX = 1920
//! resolutionY = 1080
//! [Screen.CamPosition]
//! centerx = 0.0
//! centery = 0.0
//! centerz = 0.0
//! ```
//!
//! Lengths are millimeters, angles degrees. Any format the `config` crate
//! understands by extension (TOML, YAML, JSON) is accepted.

use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::geometry::{Millimeters, PositionMm};
use crate::registry::ScreenRegistry;
use crate::screen::{Orientation, Resolution, Screen, ScreenId};
use crate::ScreenConfigError;

#[derive(Debug, Deserialize)]
struct RoomFile {
    #[serde(rename = "RoomConfig", alias = "roomconfig", default)]
    room: Option<RoomSection>,
    #[serde(rename = "Screen", alias = "screen", default)]
    screens: Vec<ScreenRecord>,
}

#[derive(Debug, Deserialize)]
struct RoomSection {
    #[serde(rename = "Screen", alias = "screen", default)]
    screens: Vec<ScreenRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct ScreenRecord {
    id: Option<i64>,
    width: Option<f64>,
    height: Option<f64>,
    #[serde(rename = "resolutionX", alias = "resolutionx")]
    resolution_x: Option<i64>,
    #[serde(rename = "resolutionY", alias = "resolutiony")]
    resolution_y: Option<i64>,
    #[serde(rename = "CamPosition", alias = "camposition")]
    cam_position: Option<CamPositionRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct CamPositionRecord {
    centerx: Option<f64>,
    centery: Option<f64>,
    centerz: Option<f64>,
    #[serde(rename = "angleX", alias = "anglex", default)]
    angle_x: f64,
    #[serde(rename = "angleY", alias = "angley", default)]
    angle_y: f64,
    #[serde(rename = "angleZ", alias = "anglez", default)]
    angle_z: f64,
}

/// Load screens from a file; the format is picked from the extension
pub fn load_screens(path: impl AsRef<Path>) -> Result<ScreenRegistry, ScreenConfigError> {
    let path = path.as_ref();
    info!("Loading screen configuration from {}", path.display());
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .build()?;
    registry_from_config(config)
}

/// Parse screens from an in-memory document
pub fn parse_screens(content: &str, format: FileFormat) -> Result<ScreenRegistry, ScreenConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(content, format))
        .build()?;
    registry_from_config(config)
}

fn registry_from_config(config: Config) -> Result<ScreenRegistry, ScreenConfigError> {
    let file: RoomFile = config.try_deserialize()?;

    let mut records = file.screens;
    if let Some(room) = file.room {
        records.extend(room.screens);
    }

    let screens = records
        .into_iter()
        .enumerate()
        .map(|(position, record)| record.into_screen(position))
        .collect::<Result<Vec<_>, _>>()?;

    let registry = ScreenRegistry::new(screens)?;
    registry.log_summary();
    Ok(registry)
}

impl ScreenRecord {
    fn into_screen(self, position: usize) -> Result<Screen, ScreenConfigError> {
        let missing = |field: &'static str| ScreenConfigError::MissingField { position, field };

        let id = self.id.ok_or_else(|| missing("id"))?;
        let id = u32::try_from(id).map_err(|_| ScreenConfigError::InvalidId(id))?;
        let width = self.width.ok_or_else(|| missing("width"))?;
        let height = self.height.ok_or_else(|| missing("height"))?;
        let resolution_x = self.resolution_x.ok_or_else(|| missing("resolutionX"))?;
        let resolution_y = self.resolution_y.ok_or_else(|| missing("resolutionY"))?;

        let resolution = Resolution {
            x: positive_pixels(id, "resolutionX", resolution_x)?,
            y: positive_pixels(id, "resolutionY", resolution_y)?,
        };

        let (center, orientation) = match self.cam_position {
            Some(cam) => (
                PositionMm::new(
                    cam.centerx.ok_or_else(|| missing("centerx"))?,
                    cam.centery.ok_or_else(|| missing("centery"))?,
                    cam.centerz.ok_or_else(|| missing("centerz"))?,
                ),
                Orientation {
                    x: cam.angle_x,
                    y: cam.angle_y,
                    z: cam.angle_z,
                },
            ),
            None => (PositionMm::default(), Orientation::default()),
        };

        Screen::new(
            ScreenId(id),
            center,
            Millimeters(width),
            Millimeters(height),
            resolution,
            orientation,
        )
    }
}

fn positive_pixels(id: u32, field: &'static str, value: i64) -> Result<u32, ScreenConfigError> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ScreenConfigError::InvalidDimension {
            id,
            field,
            value: value as f64,
        }),
    }
}
