//! Head pose to gaze ray

use nalgebra::{Rotation3, Vector3};
use screen_registry::{GazeRay, PositionM, PositionMm, ScreenHit, ScreenRegistry};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Head rotation (Euler-style angles, degrees) as reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeadRotation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl HeadRotation {
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Rotation matrix, treating (pitch, yaw, roll) as a rotation vector
    /// (axis scaled by angle) in degrees.
    pub fn to_rotation(&self) -> Rotation3<f64> {
        let rotation_vector = Vector3::new(
            self.pitch.to_radians(),
            self.yaw.to_radians(),
            self.roll.to_radians(),
        );
        Rotation3::from_scaled_axis(rotation_vector)
    }
}

/// Builds gaze rays from head pose
#[derive(Debug, Clone, Copy, Default)]
pub struct GazeResolver;

impl GazeResolver {
    pub fn new() -> Self {
        Self
    }

    /// Facing direction of an unrotated head (towards the sensor)
    pub fn forward() -> Vector3<f64> {
        Vector3::new(0.0, 0.0, -1.0)
    }

    /// Ray from the head along its facing direction, in meters
    pub fn resolve_ray(&self, head_position: PositionMm, head_rotation: HeadRotation) -> GazeRay {
        let origin = head_position.to_meters();
        let facing = head_rotation.to_rotation() * Self::forward();
        let through = PositionM::from_vector(origin.to_vector() + facing);
        GazeRay::new(origin, through)
    }

    /// First screen hit by the person's gaze, if any
    pub fn resolve(
        &self,
        registry: &ScreenRegistry,
        head_position: PositionMm,
        head_rotation: HeadRotation,
    ) -> Option<ScreenHit> {
        let ray = self.resolve_ray(head_position, head_rotation);
        let hit = registry.intersect(&ray);
        trace!(origin = ?ray.origin, screen = ?hit.map(|h| h.screen_id), "Gaze resolved");
        hit
    }
}
