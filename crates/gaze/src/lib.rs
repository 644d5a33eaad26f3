//! Gaze Estimation from Head Pose
//!
//! Turns a tracked head position and rotation into a gaze ray, resolves the
//! ray against the screen registry, and weights the estimate by how far the
//! head is from the sensor.

pub mod confidence;
pub mod error;
pub mod resolver;

pub use confidence::{DistanceConfidenceModel, DEFAULT_CONFIDENCE_TABLE};
pub use error::ConfidenceTableError;
pub use resolver::{GazeResolver, HeadRotation};
