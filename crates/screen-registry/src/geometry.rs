//! Length units and positions
//!
//! The tracker reports millimeters; screen geometry and gaze rays are in
//! meters. The only way from one to the other is `to_meters`, so every
//! intersection test sees a single linear unit.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Millimeters per meter
pub const MM_PER_METER: f64 = 1000.0;

/// A length in millimeters (tracker native unit)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// A length in meters (screen geometry unit)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl Millimeters {
    pub fn to_meters(self) -> Meters {
        Meters(self.0 / MM_PER_METER)
    }
}

impl Meters {
    pub fn to_millimeters(self) -> Millimeters {
        Millimeters(self.0 * MM_PER_METER)
    }
}

/// Position in the sensor frame, millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionMm {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PositionMm {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to the sensor origin
    pub fn distance_from_origin(&self) -> Millimeters {
        Millimeters((self.x * self.x + self.y * self.y + self.z * self.z).sqrt())
    }

    pub fn to_meters(self) -> PositionM {
        PositionM {
            x: self.x / MM_PER_METER,
            y: self.y / MM_PER_METER,
            z: self.z / MM_PER_METER,
        }
    }
}

/// Position in the sensor frame, meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionM {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PositionM {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_vector(v: Vector3<f64>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Line through a person's head along the head's facing direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeRay {
    /// Head position
    pub origin: PositionM,
    /// Second point, one meter along the facing direction
    pub through: PositionM,
}

impl GazeRay {
    pub fn new(origin: PositionM, through: PositionM) -> Self {
        Self { origin, through }
    }

    /// Direction vector (`through - origin`)
    pub fn direction(&self) -> Vector3<f64> {
        self.through.to_vector() - self.origin.to_vector()
    }
}
