//! Events and per-frame report

use screen_registry::{ScreenHit, ScreenId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::frame::PersonId;
use crate::interest::Interest;

/// Attention event emitted by one frame update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttentionEvent {
    /// A person's interest level changed
    InterestChanged {
        person: PersonId,
        screen: ScreenId,
        interest: Interest,
    },

    /// A person's watched screen changed (`ScreenId::NONE` when looking
    /// at no screen)
    ScreenWatchedChanged {
        person: PersonId,
        previous: ScreenId,
        screen: ScreenId,
    },

    /// Every face-tracked person started watching the same screen
    JointAttentionStart { screen: ScreenId },

    /// Joint attention no longer holds
    JointAttentionEnd,

    /// Number of visible persons changed
    VisibleCountChanged { count: usize },

    /// Set of visible, face-tracked persons changed
    FaceTrackedChanged { persons: Vec<PersonId> },
}

impl AttentionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AttentionEvent::InterestChanged { .. } => "interest_changed",
            AttentionEvent::ScreenWatchedChanged { .. } => "screen_watched_changed",
            AttentionEvent::JointAttentionStart { .. } => "joint_attention_start",
            AttentionEvent::JointAttentionEnd => "joint_attention_end",
            AttentionEvent::VisibleCountChanged { .. } => "visible_count_changed",
            AttentionEvent::FaceTrackedChanged { .. } => "face_tracked_changed",
        }
    }
}

/// Gaze resolution for one face-tracked person in one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    pub person: PersonId,

    /// Watched screen, `ScreenId::NONE` on a miss
    pub screen: ScreenId,

    pub hit: Option<ScreenHit>,

    /// Distance-based reliability in `[0, 1]`. Informational only.
    pub confidence: f64,

    /// Sensor-to-head distance (mm)
    pub distance_mm: f64,
}

/// Everything one `update` produced
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameReport {
    #[serde(with = "crate::frame::duration_ms")]
    pub timestamp: Duration,
    pub events: Vec<AttentionEvent>,
    pub gaze: Vec<GazeSample>,
    pub joint_attention: bool,
}

impl FrameReport {
    pub fn is_quiet(&self) -> bool {
        self.events.is_empty()
    }
}
