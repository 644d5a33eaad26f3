//! Gaze Error Types

use thiserror::Error;

/// Errors building a confidence-by-distance table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfidenceTableError {
    /// Interpolation needs at least two breakpoints
    #[error("Confidence table needs at least 2 breakpoints, got {0}")]
    TooFewBreakpoints(usize),

    /// NaN or infinite distance/confidence
    #[error("Confidence table contains a non-finite value")]
    NonFinite,

    /// Confidence outside `[0, 1]`
    #[error("Confidence {0} at {1}mm is outside [0, 1]")]
    ConfidenceOutOfRange(f64, f64),

    /// Two breakpoints at the same distance
    #[error("Duplicate breakpoint distance {0}mm")]
    DuplicateDistance(f64),
}
