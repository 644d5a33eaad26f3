//! Per-person and group attention state

use screen_registry::ScreenId;
use std::time::Duration;

use crate::interest::{Interest, InterestThresholds};
use crate::stabilizer::DetectionStabilizer;

/// What changed for one person during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// Previous screen, when the watched screen changed this frame
    pub screen_changed_from: Option<ScreenId>,
    /// New level, when the interest level changed this frame
    pub interest_changed_to: Option<Interest>,
}

/// Attention state of one person, kept across frames and across periods
/// where the person is not visible.
#[derive(Debug, Clone)]
pub struct PersonAttentionState {
    stabilizer: DetectionStabilizer,

    /// Screen watched in the last updated frame
    screen: ScreenId,

    /// Start of the current continuous watch
    watch_started: Duration,

    /// Last time the watched screen changed
    last_change: Duration,

    /// Time of the last update that touched this person
    last_update: Duration,

    interest: Interest,

    /// Set only for the frame in which the screen changed
    just_changed: bool,
}

impl PersonAttentionState {
    pub fn new(stabilizer: DetectionStabilizer, now: Duration) -> Self {
        Self {
            stabilizer,
            screen: ScreenId::NONE,
            watch_started: now,
            last_change: now,
            last_update: now,
            interest: Interest::None,
            just_changed: false,
        }
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    pub fn interest(&self) -> Interest {
        self.interest
    }

    pub fn watch_started(&self) -> Duration {
        self.watch_started
    }

    pub fn last_change(&self) -> Duration {
        self.last_change
    }

    /// Continuous watch time on the current screen as of the last update
    pub fn watch_duration(&self) -> Duration {
        self.last_update.saturating_sub(self.watch_started)
    }

    pub fn screen_just_changed(&self) -> bool {
        self.just_changed
    }

    pub fn is_face_stable(&self) -> bool {
        self.stabilizer.is_stable()
    }

    pub(crate) fn stabilizer_mut(&mut self) -> &mut DetectionStabilizer {
        &mut self.stabilizer
    }

    /// Clear per-frame flags
    pub fn begin_frame(&mut self) {
        self.just_changed = false;
    }

    /// Restart the watch timer without touching the watched screen
    pub fn restart_timer(&mut self, now: Duration) {
        self.watch_started = now;
        self.last_update = now;
    }

    /// Move the state machine to this frame's watched screen
    pub fn advance(
        &mut self,
        screen: ScreenId,
        now: Duration,
        thresholds: &InterestThresholds,
    ) -> Transition {
        let mut transition = Transition::default();

        if screen != self.screen {
            transition.screen_changed_from = Some(self.screen);
            self.screen = screen;
            self.watch_started = now;
            self.last_change = now;
            self.just_changed = true;
        }
        self.last_update = now;

        let interest = thresholds.classify(self.watch_duration());
        if interest != self.interest {
            self.interest = interest;
            transition.interest_changed_to = Some(interest);
        }

        transition
    }
}

/// Joint attention edge detector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupAttentionState {
    joint: bool,
    screen: ScreenId,
}

/// Edge produced by one group update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupEdge {
    Started(ScreenId),
    Ended,
}

impl GroupAttentionState {
    pub fn is_joint(&self) -> bool {
        self.joint
    }

    /// Shared screen while joint attention holds
    pub fn screen(&self) -> Option<ScreenId> {
        self.joint.then_some(self.screen)
    }

    /// Feed this frame's shared screen (`None` when attention is not joint)
    pub fn update(&mut self, shared: Option<ScreenId>) -> Option<GroupEdge> {
        let was_joint = self.joint;
        self.joint = shared.is_some();
        if let Some(screen) = shared {
            self.screen = screen;
        }

        match (was_joint, self.joint) {
            (false, true) => Some(GroupEdge::Started(self.screen)),
            (true, false) => Some(GroupEdge::Ended),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Shared screen of a group, if at least two participants all watch the
/// same screen id. Looking at no screen together counts.
pub fn shared_screen(screens: &[ScreenId]) -> Option<ScreenId> {
    let (first, rest) = screens.split_first()?;
    if rest.is_empty() {
        return None;
    }
    rest.iter().all(|s| s == first).then_some(*first)
}
