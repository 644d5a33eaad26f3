//! Face detection stabilization

use ring_buffer::RingBuffer;

/// Sliding window of raw per-frame face detections for one person.
///
/// The window starts full of negatives so a newly seen person needs at
/// least `min_votes` positive frames before being considered tracked.
#[derive(Debug, Clone)]
pub struct DetectionStabilizer {
    window: RingBuffer<bool>,
    min_votes: usize,
}

impl DetectionStabilizer {
    pub fn new(window: usize, min_votes: usize) -> Self {
        Self {
            window: RingBuffer::filled(window, false),
            min_votes: min_votes.max(1),
        }
    }

    /// Push this frame's raw detection, return the number of positives
    /// left in the window.
    pub fn vote(&mut self, detected: bool) -> usize {
        self.window.push(detected);
        self.stable_count()
    }

    pub fn stable_count(&self) -> usize {
        self.window.count_where(|detected| *detected)
    }

    pub fn is_stable(&self) -> bool {
        self.stable_count() >= self.min_votes
    }

    pub fn window_len(&self) -> usize {
        self.window.capacity()
    }
}
