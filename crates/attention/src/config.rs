//! Attention engine configuration

use gaze::{DistanceConfidenceModel, DEFAULT_CONFIDENCE_TABLE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::interest::InterestThresholds;
use crate::AttentionError;

/// Attention engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttentionConfig {
    /// Continuous watch time before a person counts as orienting (seconds)
    pub orienting_after_secs: f64,

    /// Continuous watch time before a person counts as engaged (seconds)
    pub engaged_after_secs: f64,

    /// Watch time after which a person counts as staring (seconds, exclusive)
    pub staring_after_secs: f64,

    /// Face detection history length per person (frames)
    pub stabilizer_window: usize,

    /// Positive detections in the window needed to count as face tracked
    pub stabilizer_min_votes: usize,

    /// Gaze confidence breakpoints: (distance mm, confidence)
    pub confidence_table: Vec<(f64, f64)>,
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            orienting_after_secs: 1.5,
            engaged_after_secs: 6.0,
            staring_after_secs: 15.0,
            stabilizer_window: 3,
            stabilizer_min_votes: 1,
            confidence_table: DEFAULT_CONFIDENCE_TABLE.to_vec(),
        }
    }
}

impl AttentionConfig {
    /// Stricter face stabilization (majority of a 5-frame window)
    pub fn strict() -> Self {
        Self {
            stabilizer_window: 5,
            stabilizer_min_votes: 3,
            ..Default::default()
        }
    }

    /// Check thresholds, confidence table and stabilizer window
    pub fn validate(&self) -> Result<(), AttentionError> {
        self.thresholds()?;
        self.confidence_model()?;
        if self.stabilizer_window == 0
            || self.stabilizer_min_votes == 0
            || self.stabilizer_min_votes > self.stabilizer_window
        {
            return Err(AttentionError::InvalidWindow {
                window: self.stabilizer_window,
                min_votes: self.stabilizer_min_votes,
            });
        }
        Ok(())
    }

    /// Interest thresholds as durations
    pub fn thresholds(&self) -> Result<InterestThresholds, AttentionError> {
        let secs = [
            self.orienting_after_secs,
            self.engaged_after_secs,
            self.staring_after_secs,
        ];
        let ordered = secs.iter().all(|s| s.is_finite() && *s >= 0.0)
            && secs[0] <= secs[1]
            && secs[1] <= secs[2];
        if !ordered {
            return Err(AttentionError::InvalidThresholds(secs));
        }

        let duration = |s: f64| {
            Duration::try_from_secs_f64(s).map_err(|_| AttentionError::InvalidThresholds(secs))
        };
        Ok(InterestThresholds {
            orienting: duration(secs[0])?,
            engaged: duration(secs[1])?,
            staring: duration(secs[2])?,
        })
    }

    pub fn confidence_model(&self) -> Result<DistanceConfidenceModel, AttentionError> {
        Ok(DistanceConfidenceModel::new(self.confidence_table.clone())?)
    }
}
