//! Tracker snapshot types
//!
//! One `FrameSnapshot` per tracker update. The engine borrows it for the
//! duration of a single `update` call.

use gaze::HeadRotation;
use screen_registry::PositionMm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Stable tracker-assigned person identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u32);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One person as seen by the tracker in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedPerson {
    pub id: PersonId,

    /// Head center in the sensor frame (millimeters)
    pub head_position: PositionMm,

    /// Head rotation (degrees)
    pub head_rotation: HeadRotation,

    /// Face detected by the tracker this frame (raw, unstabilized)
    #[serde(default)]
    pub face_tracked: bool,

    /// Person is currently visible to the tracker
    #[serde(default = "default_tracked")]
    pub tracked: bool,
}

fn default_tracked() -> bool {
    true
}

impl TrackedPerson {
    /// A visible person with a tracked face
    pub fn visible(id: u32, head_position: PositionMm, head_rotation: HeadRotation) -> Self {
        Self {
            id: PersonId(id),
            head_position,
            head_rotation,
            face_tracked: true,
            tracked: true,
        }
    }
}

/// All persons reported by the tracker for one frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Monotonic frame time, read once per frame
    #[serde(rename = "timestamp_ms", with = "duration_ms")]
    pub timestamp: Duration,

    /// Persons in tracker order (closest first)
    #[serde(default)]
    pub persons: Vec<TrackedPerson>,
}

impl FrameSnapshot {
    pub fn new(timestamp: Duration, persons: Vec<TrackedPerson>) -> Self {
        Self { timestamp, persons }
    }
}

pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
