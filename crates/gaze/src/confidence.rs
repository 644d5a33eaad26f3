//! Confidence-by-distance model
//!
//! Head rotation estimates degrade both very close to and far from the
//! sensor. The model is a piecewise-linear curve over distance; outside the
//! table the estimate is not trusted at all.

use screen_registry::Millimeters;
use serde::{Deserialize, Serialize};

use crate::error::ConfidenceTableError;

/// Default breakpoints: (distance mm, confidence)
pub const DEFAULT_CONFIDENCE_TABLE: [(f64, f64); 7] = [
    (800.0, 0.0),
    (1000.0, 1.0),
    (1500.0, 1.0),
    (2000.0, 0.80),
    (2500.0, 0.60),
    (3000.0, 0.40),
    (4000.0, 0.0),
];

/// Piecewise-linear reliability weight for head-pose gaze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct DistanceConfidenceModel {
    /// Breakpoints sorted by strictly ascending distance
    breakpoints: Vec<(f64, f64)>,
}

impl DistanceConfidenceModel {
    /// Build from (distance mm, confidence) pairs in any order.
    ///
    /// Distances are sorted; confidences may rise and fall but must stay in
    /// `[0, 1]`.
    pub fn new(mut breakpoints: Vec<(f64, f64)>) -> Result<Self, ConfidenceTableError> {
        if breakpoints.len() < 2 {
            return Err(ConfidenceTableError::TooFewBreakpoints(breakpoints.len()));
        }
        if breakpoints
            .iter()
            .any(|(d, c)| !d.is_finite() || !c.is_finite())
        {
            return Err(ConfidenceTableError::NonFinite);
        }
        if let Some(&(d, c)) = breakpoints.iter().find(|(_, c)| !(0.0..=1.0).contains(c)) {
            return Err(ConfidenceTableError::ConfidenceOutOfRange(c, d));
        }

        breakpoints.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(pair) = breakpoints.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(ConfidenceTableError::DuplicateDistance(pair[0].0));
        }

        Ok(Self { breakpoints })
    }

    pub fn breakpoints(&self) -> &[(f64, f64)] {
        &self.breakpoints
    }

    /// Confidence in `[0, 1]` for a sensor-to-head distance
    pub fn confidence_for(&self, distance: Millimeters) -> f64 {
        let d = distance.0;
        let (first, last) = match (self.breakpoints.first(), self.breakpoints.last()) {
            (Some(first), Some(last)) => (first.0, last.0),
            _ => return 0.0,
        };
        if !d.is_finite() || d < first || d >= last {
            return 0.0;
        }

        self.breakpoints
            .windows(2)
            .find(|pair| d >= pair[0].0 && d < pair[1].0)
            .map(|pair| {
                let (d0, c0) = pair[0];
                let (d1, c1) = pair[1];
                let slope = (c1 - c0) / (d1 - d0);
                (c0 + slope * (d - d0)).clamp(0.0, 1.0)
            })
            .unwrap_or(0.0)
    }
}

impl Default for DistanceConfidenceModel {
    fn default() -> Self {
        Self {
            breakpoints: DEFAULT_CONFIDENCE_TABLE.to_vec(),
        }
    }
}

impl TryFrom<Vec<(f64, f64)>> for DistanceConfidenceModel {
    type Error = ConfidenceTableError;

    fn try_from(breakpoints: Vec<(f64, f64)>) -> Result<Self, Self::Error> {
        Self::new(breakpoints)
    }
}

impl From<DistanceConfidenceModel> for Vec<(f64, f64)> {
    fn from(model: DistanceConfidenceModel) -> Self {
        model.breakpoints
    }
}
