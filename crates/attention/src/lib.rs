//! Attention Engine
//!
//! Turns per-frame head tracking into attention events:
//! - Face detection stabilization per person
//! - Watched screen and interest level per person
//! - Joint attention across all face-tracked persons
//! - Interest gauge for presentation

pub mod config;
pub mod event;
pub mod frame;
pub mod gauge;
pub mod interest;
pub mod stabilizer;
pub mod state;
pub mod tracker;

pub use config::AttentionConfig;
pub use event::{AttentionEvent, FrameReport, GazeSample};
pub use frame::{FrameSnapshot, PersonId, TrackedPerson};
pub use gauge::InterestGauge;
pub use interest::{Interest, InterestThresholds};
pub use stabilizer::DetectionStabilizer;
pub use state::{GroupAttentionState, PersonAttentionState};
pub use tracker::AttentionTracker;

use gaze::ConfidenceTableError;
use thiserror::Error;

/// Attention engine configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttentionError {
    #[error("Invalid confidence table: {0}")]
    Confidence(#[from] ConfidenceTableError),

    #[error("Invalid stabilizer window: {min_votes} votes out of {window} frames")]
    InvalidWindow { window: usize, min_votes: usize },

    #[error("Interest thresholds must be finite, non-negative and ordered, got {0:?}")]
    InvalidThresholds([f64; 3]),
}
