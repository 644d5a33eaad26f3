//! Screen Registry
//!
//! Geometric description of the physical screens in a room and the
//! gaze-line / screen intersection used to decide which screen a person is
//! looking at:
//! - Millimeter / meter position types
//! - Screen rectangles in the sensor frame
//! - First-hit intersection in registration order
//! - Screen configuration loading

pub mod geometry;
pub mod loader;
pub mod registry;
pub mod screen;

pub use geometry::{GazeRay, Meters, Millimeters, PositionM, PositionMm, MM_PER_METER};
pub use loader::{load_screens, parse_screens};
pub use registry::ScreenRegistry;
pub use screen::{LocalPoint, Orientation, Resolution, Screen, ScreenHit, ScreenId};

use thiserror::Error;

/// Screen configuration errors. All of them are fatal at load time.
#[derive(Error, Debug)]
pub enum ScreenConfigError {
    #[error("Failed to read screen configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Screen #{position}: missing required field '{field}'")]
    MissingField {
        position: usize,
        field: &'static str,
    },

    #[error("Screen {id}: invalid {field} ({value}), must be > 0")]
    InvalidDimension {
        id: u32,
        field: &'static str,
        value: f64,
    },

    #[error("Invalid screen id {0}")]
    InvalidId(i64),

    #[error("Screen id 0 is reserved for 'no screen'")]
    ReservedId,

    #[error("Duplicate screen id {0}")]
    DuplicateId(u32),

    #[error("No screen defined")]
    Empty,
}
