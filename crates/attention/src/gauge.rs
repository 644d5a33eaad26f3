//! Interest gauge for on-screen presentation
//!
//! Uses its own 8s / 16s ramp, independent of the interest event
//! thresholds. The two scales are kept apart on purpose until someone
//! decides they should match.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Below this, the gauge is empty
pub const GAUGE_START_SECS: f64 = 1.5;
/// Colour turns from green-yellow to yellow-red here
pub const GAUGE_MIDPOINT_SECS: f64 = 8.0;
/// Gauge full
pub const GAUGE_FULL_SECS: f64 = 16.0;

/// Fill ratio and RGB colour of an interest bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestGauge {
    /// Fill ratio in [0, 1]
    pub fill: f64,
    /// RGB colour
    pub color: [u8; 3],
}

impl InterestGauge {
    pub fn for_duration(watch_duration: Duration) -> Self {
        let t = watch_duration.as_secs_f64();

        if t <= GAUGE_START_SECS {
            Self {
                fill: 0.0,
                color: [255, 255, 255],
            }
        } else if t < GAUGE_MIDPOINT_SECS {
            Self {
                fill: t / GAUGE_FULL_SECS,
                color: [channel(255.0 * t / GAUGE_MIDPOINT_SECS), 255, 0],
            }
        } else if t < GAUGE_FULL_SECS {
            let ramp = (t - GAUGE_MIDPOINT_SECS) / (GAUGE_FULL_SECS - GAUGE_MIDPOINT_SECS);
            Self {
                fill: t / GAUGE_FULL_SECS,
                color: [255, channel(255.0 - 255.0 * ramp), 0],
            }
        } else {
            Self {
                fill: 1.0,
                color: [255, 0, 0],
            }
        }
    }
}

fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
