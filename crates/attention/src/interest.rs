//! Interest levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Sustained attention towards one screen, by continuous watch time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Interest {
    /// Below the orienting threshold (default < 1.5s)
    #[default]
    None = 0,
    /// Default [1.5s, 6s)
    Orienting = 1,
    /// Default [6s, 15s], upper bound inclusive
    Engaged = 2,
    /// Default > 15s
    Staring = 3,
}

impl Interest {
    /// Numeric level as sent to downstream consumers
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Interest::None => "NONE",
            Interest::Orienting => "ORIENTING",
            Interest::Engaged => "ENGAGED",
            Interest::Staring => "STARING",
        };
        f.write_str(name)
    }
}

/// Watch-duration boundaries between interest levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterestThresholds {
    /// Orienting from this duration on (inclusive)
    pub orienting: Duration,
    /// Engaged from this duration on (inclusive)
    pub engaged: Duration,
    /// Staring strictly above this duration
    pub staring: Duration,
}

impl Default for InterestThresholds {
    fn default() -> Self {
        Self {
            orienting: Duration::from_millis(1500),
            engaged: Duration::from_secs(6),
            staring: Duration::from_secs(15),
        }
    }
}

impl InterestThresholds {
    pub fn classify(&self, watch_duration: Duration) -> Interest {
        if watch_duration < self.orienting {
            Interest::None
        } else if watch_duration < self.engaged {
            Interest::Orienting
        } else if watch_duration <= self.staring {
            Interest::Engaged
        } else {
            Interest::Staring
        }
    }
}
