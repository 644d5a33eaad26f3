//! Frame-synchronous attention tracker
//!
//! One `update` per tracker frame. Each update:
//! 1. Determines the visible set from the snapshot
//! 2. Resolves gaze and advances interest for every visible, face-stable
//!    person, in tracker order
//! 3. Derives the joint attention edge from this frame's watched screens
//!
//! The frame timestamp is the only clock the tracker reads.

use gaze::{DistanceConfidenceModel, GazeResolver};
use screen_registry::{ScreenId, ScreenRegistry};
use std::collections::{HashMap, HashSet};
use std::mem;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::config::AttentionConfig;
use crate::event::{AttentionEvent, FrameReport, GazeSample};
use crate::frame::{FrameSnapshot, PersonId, TrackedPerson};
use crate::interest::InterestThresholds;
use crate::stabilizer::DetectionStabilizer;
use crate::state::{shared_screen, GroupAttentionState, GroupEdge, PersonAttentionState};
use crate::AttentionError;

/// Attention tracker over a fixed set of screens
pub struct AttentionTracker {
    registry: ScreenRegistry,
    resolver: GazeResolver,
    confidence: DistanceConfidenceModel,
    thresholds: InterestThresholds,
    config: AttentionConfig,

    /// Grown lazily on first sighting, never evicted by `update`
    persons: HashMap<PersonId, PersonAttentionState>,
    group: GroupAttentionState,

    visible_count: usize,
    face_tracked: Vec<PersonId>,
    pending_timer_reset: bool,
}

impl AttentionTracker {
    pub fn new(registry: ScreenRegistry, config: AttentionConfig) -> Result<Self, AttentionError> {
        config.validate()?;
        let thresholds = config.thresholds()?;
        let confidence = config.confidence_model()?;

        info!(
            screens = registry.len(),
            orienting = ?thresholds.orienting,
            engaged = ?thresholds.engaged,
            staring = ?thresholds.staring,
            window = config.stabilizer_window,
            min_votes = config.stabilizer_min_votes,
            "Attention tracker ready"
        );

        Ok(Self {
            registry,
            resolver: GazeResolver::new(),
            confidence,
            thresholds,
            config,
            persons: HashMap::new(),
            group: GroupAttentionState::default(),
            visible_count: 0,
            face_tracked: Vec::new(),
            pending_timer_reset: false,
        })
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    pub fn config(&self) -> &AttentionConfig {
        &self.config
    }

    pub fn person(&self, id: PersonId) -> Option<&PersonAttentionState> {
        self.persons.get(&id)
    }

    pub fn is_joint_attention(&self) -> bool {
        self.group.is_joint()
    }

    /// Visible, face-stable persons as of the last update
    pub fn face_tracked(&self) -> &[PersonId] {
        &self.face_tracked
    }

    /// Restart the watch timer of every visible person on the next update
    pub fn request_timer_reset(&mut self) {
        self.pending_timer_reset = true;
    }

    /// Drop one person's state
    pub fn forget(&mut self, id: PersonId) -> bool {
        self.persons.remove(&id).is_some()
    }

    /// Drop all person and group state. Emits nothing.
    pub fn reset(&mut self) {
        self.persons.clear();
        self.group.reset();
        self.visible_count = 0;
        self.face_tracked.clear();
        self.pending_timer_reset = false;
        info!("Attention state reset");
    }

    /// Process one tracker frame
    pub fn update(&mut self, frame: &FrameSnapshot) -> FrameReport {
        let now = frame.timestamp;
        let reset_timers = mem::take(&mut self.pending_timer_reset);
        let mut events = Vec::new();
        let mut gaze = Vec::new();

        // (1) Visible set, tracker order, first occurrence of an id wins
        let mut seen = HashSet::new();
        let visible: Vec<&TrackedPerson> = frame
            .persons
            .iter()
            .filter(|p| p.tracked && seen.insert(p.id))
            .collect();

        if visible.len() != self.visible_count {
            debug!(previous = self.visible_count, count = visible.len(), "Visible persons changed");
            self.visible_count = visible.len();
            events.push(AttentionEvent::VisibleCountChanged {
                count: visible.len(),
            });
        }

        if reset_timers {
            info!(persons = visible.len(), at = ?now, "Restarting watch timers");
        }

        // (2) Individuals
        let mut face_tracked = Vec::with_capacity(visible.len());
        let mut watched = Vec::with_capacity(visible.len());

        for person in &visible {
            let window = self.config.stabilizer_window;
            let min_votes = self.config.stabilizer_min_votes;
            let state = self
                .persons
                .entry(person.id)
                .or_insert_with(|| PersonAttentionState::new(DetectionStabilizer::new(window, min_votes), now));
            state.begin_frame();

            if reset_timers {
                state.restart_timer(now);
            }

            state.stabilizer_mut().vote(person.face_tracked);
            if !state.is_face_stable() {
                continue;
            }
            face_tracked.push(person.id);

            let ray = self.resolver.resolve_ray(person.head_position, person.head_rotation);
            let hit = self.registry.intersect(&ray);
            let screen = hit.map(|h| h.screen_id).unwrap_or(ScreenId::NONE);

            let distance = person.head_position.distance_from_origin();
            let confidence = self.confidence.confidence_for(distance);

            let transition = state.advance(screen, now, &self.thresholds);

            if let Some(previous) = transition.screen_changed_from {
                debug!(person = %person.id, %previous, %screen, confidence, "Watched screen changed");
                events.push(AttentionEvent::ScreenWatchedChanged {
                    person: person.id,
                    previous,
                    screen,
                });
            }
            if let Some(interest) = transition.interest_changed_to {
                debug!(person = %person.id, %screen, %interest, "Interest changed");
                events.push(AttentionEvent::InterestChanged {
                    person: person.id,
                    screen,
                    interest,
                });
            }

            trace!(person = %person.id, %screen, confidence, distance_mm = distance.0, "Gaze sample");
            gaze.push(GazeSample {
                person: person.id,
                screen,
                hit,
                confidence,
                distance_mm: distance.0,
            });
            watched.push(screen);
        }

        if face_tracked != self.face_tracked {
            events.push(AttentionEvent::FaceTrackedChanged {
                persons: face_tracked.clone(),
            });
            self.face_tracked = face_tracked;
        }

        // (3) Group edge from this frame's screens
        match self.group.update(shared_screen(&watched)) {
            Some(GroupEdge::Started(screen)) => {
                info!(%screen, persons = watched.len(), "Joint attention started");
                events.push(AttentionEvent::JointAttentionStart { screen });
            }
            Some(GroupEdge::Ended) => {
                info!("Joint attention ended");
                events.push(AttentionEvent::JointAttentionEnd);
            }
            None => {}
        }

        FrameReport {
            timestamp: now,
            events,
            gaze,
            joint_attention: self.group.is_joint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interest::Interest;
    use gaze::HeadRotation;
    use screen_registry::{Millimeters, Orientation, PositionMm, Resolution, Screen};

    const LEFT: f64 = -1000.0;
    const RIGHT: f64 = 1000.0;
    const NOWHERE: f64 = 0.0;

    fn registry() -> ScreenRegistry {
        let screen = |id, x| {
            Screen::new(
                ScreenId(id),
                PositionMm::new(x, 0.0, 0.0),
                Millimeters(1000.0),
                Millimeters(600.0),
                Resolution { x: 1920, y: 1080 },
                Orientation::default(),
            )
            .unwrap()
        };
        ScreenRegistry::new(vec![screen(1, LEFT), screen(2, RIGHT)]).unwrap()
    }

    fn tracker() -> AttentionTracker {
        AttentionTracker::new(registry(), AttentionConfig::default()).unwrap()
    }

    /// Person facing the sensor plane from 2m, in front of `x`
    fn at(id: u32, x: f64) -> TrackedPerson {
        TrackedPerson::visible(id, PositionMm::new(x, 0.0, 2000.0), HeadRotation::default())
    }

    fn frame(secs: f64, persons: Vec<TrackedPerson>) -> FrameSnapshot {
        FrameSnapshot::new(Duration::from_secs_f64(secs), persons)
    }

    fn interest_events(report: &FrameReport) -> Vec<Interest> {
        report
            .events
            .iter()
            .filter_map(|e| match e {
                AttentionEvent::InterestChanged { interest, .. } => Some(*interest),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AttentionConfig {
            stabilizer_window: 0,
            ..Default::default()
        };
        assert!(AttentionTracker::new(registry(), config).is_err());
    }

    #[test]
    fn test_first_frame_events_in_order() {
        let mut t = tracker();
        let report = t.update(&frame(0.0, vec![at(1, LEFT)]));

        assert_eq!(
            report.events,
            vec![
                AttentionEvent::VisibleCountChanged { count: 1 },
                AttentionEvent::ScreenWatchedChanged {
                    person: PersonId(1),
                    previous: ScreenId::NONE,
                    screen: ScreenId(1),
                },
                AttentionEvent::FaceTrackedChanged {
                    persons: vec![PersonId(1)],
                },
            ]
        );
        assert!(!report.joint_attention);
    }

    #[test]
    fn test_gaze_sample() {
        let mut t = tracker();
        let report = t.update(&frame(0.0, vec![at(1, LEFT), at(2, NOWHERE)]));

        assert_eq!(report.gaze.len(), 2);
        let first = &report.gaze[0];
        assert_eq!(first.screen, ScreenId(1));
        assert!((first.distance_mm - (1000.0f64.powi(2) + 2000.0f64.powi(2)).sqrt()).abs() < 1e-9);
        assert!(first.confidence > 0.6 && first.confidence < 0.8);
        let hit = first.hit.unwrap();
        assert!((hit.local.u - 0.5).abs() < 1e-9);
        assert!((hit.local.v - 0.5).abs() < 1e-9);

        // Straight in front of the sensor, between the screens
        let second = &report.gaze[1];
        assert_eq!(second.screen, ScreenId::NONE);
        assert_eq!(second.hit, None);
        assert_eq!(second.distance_mm, 2000.0);
        assert!((second.confidence - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_interest_progression_fires_once_per_level() {
        let mut t = tracker();
        let mut levels = Vec::new();
        for step in 0..=170 {
            let report = t.update(&frame(step as f64 * 0.1, vec![at(1, RIGHT)]));
            levels.extend(interest_events(&report));
        }
        assert_eq!(
            levels,
            vec![Interest::Orienting, Interest::Engaged, Interest::Staring]
        );
        assert_eq!(t.person(PersonId(1)).unwrap().interest(), Interest::Staring);
    }

    #[test]
    fn test_screen_change_resets_interest() {
        let mut t = tracker();
        t.update(&frame(0.0, vec![at(1, LEFT)]));
        t.update(&frame(2.0, vec![at(1, LEFT)]));
        let report = t.update(&frame(2.5, vec![at(1, RIGHT)]));

        assert_eq!(
            report.events,
            vec![
                AttentionEvent::ScreenWatchedChanged {
                    person: PersonId(1),
                    previous: ScreenId(1),
                    screen: ScreenId(2),
                },
                AttentionEvent::InterestChanged {
                    person: PersonId(1),
                    screen: ScreenId(2),
                    interest: Interest::None,
                },
            ]
        );
        let state = t.person(PersonId(1)).unwrap();
        assert!(state.screen_just_changed());

        t.update(&frame(2.6, vec![at(1, RIGHT)]));
        assert!(!t.person(PersonId(1)).unwrap().screen_just_changed());
    }

    #[test]
    fn test_joint_attention_edges() {
        let mut t = tracker();

        let report = t.update(&frame(0.0, vec![at(1, LEFT), at(2, LEFT)]));
        assert_eq!(
            report.events.last(),
            Some(&AttentionEvent::JointAttentionStart { screen: ScreenId(1) })
        );
        assert!(report.joint_attention);

        let report = t.update(&frame(0.1, vec![at(1, LEFT), at(2, LEFT)]));
        assert!(report.events.is_empty());

        let report = t.update(&frame(0.2, vec![at(1, LEFT), at(2, RIGHT)]));
        assert_eq!(report.events.last(), Some(&AttentionEvent::JointAttentionEnd));
        assert!(!report.joint_attention);
    }

    #[test]
    fn test_joint_attention_ends_once_when_third_person_looks_elsewhere() {
        let mut t = tracker();
        let report = t.update(&frame(0.0, vec![at(1, LEFT), at(2, LEFT)]));
        assert!(report.joint_attention);

        let group = vec![at(1, LEFT), at(2, LEFT), at(3, RIGHT)];
        let report = t.update(&frame(0.1, group.clone()));
        assert!(!report.joint_attention);
        let ends = report
            .events
            .iter()
            .filter(|e| **e == AttentionEvent::JointAttentionEnd)
            .count();
        assert_eq!(ends, 1);
        assert_eq!(report.events.last(), Some(&AttentionEvent::JointAttentionEnd));

        let report = t.update(&frame(0.2, group));
        assert!(!report.joint_attention);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_joint_attention_ends_when_group_shrinks() {
        let mut t = tracker();
        t.update(&frame(0.0, vec![at(1, RIGHT), at(2, RIGHT)]));

        let report = t.update(&frame(0.1, vec![at(1, RIGHT)]));
        assert_eq!(
            report.events,
            vec![
                AttentionEvent::VisibleCountChanged { count: 1 },
                AttentionEvent::FaceTrackedChanged {
                    persons: vec![PersonId(1)],
                },
                AttentionEvent::JointAttentionEnd,
            ]
        );
    }

    #[test]
    fn test_single_person_never_joint() {
        let mut t = tracker();
        for step in 0..5 {
            let report = t.update(&frame(step as f64, vec![at(1, LEFT)]));
            assert!(!report.joint_attention);
        }
    }

    #[test]
    fn test_looking_nowhere_together_is_joint() {
        let mut t = tracker();
        let report = t.update(&frame(0.0, vec![at(1, NOWHERE), at(2, NOWHERE)]));
        assert!(report.joint_attention);
        assert_eq!(
            report.events,
            vec![
                AttentionEvent::VisibleCountChanged { count: 2 },
                AttentionEvent::FaceTrackedChanged {
                    persons: vec![PersonId(1), PersonId(2)],
                },
                AttentionEvent::JointAttentionStart {
                    screen: ScreenId::NONE
                },
            ]
        );

        // One of them turns to a screen
        let report = t.update(&frame(0.1, vec![at(1, LEFT), at(2, NOWHERE)]));
        assert_eq!(report.events.last(), Some(&AttentionEvent::JointAttentionEnd));
        assert!(!report.joint_attention);
    }

    #[test]
    fn test_timer_reset_keeps_screen() {
        let mut t = tracker();
        t.update(&frame(0.0, vec![at(1, LEFT)]));
        let report = t.update(&frame(7.0, vec![at(1, LEFT)]));
        assert_eq!(interest_events(&report), vec![Interest::Engaged]);

        t.request_timer_reset();
        let report = t.update(&frame(7.1, vec![at(1, LEFT)]));
        assert_eq!(
            report.events,
            vec![AttentionEvent::InterestChanged {
                person: PersonId(1),
                screen: ScreenId(1),
                interest: Interest::None,
            }]
        );
        let state = t.person(PersonId(1)).unwrap();
        assert_eq!(state.screen(), ScreenId(1));
        assert_eq!(state.watch_started(), Duration::from_secs_f64(7.1));

        // Consumed by one update
        let report = t.update(&frame(8.7, vec![at(1, LEFT)]));
        assert_eq!(interest_events(&report), vec![Interest::Orienting]);
    }

    #[test]
    fn test_absent_person_state_is_kept() {
        let mut t = tracker();
        t.update(&frame(0.0, vec![at(1, LEFT)]));
        t.update(&frame(1.0, vec![at(1, LEFT)]));

        let report = t.update(&frame(2.0, vec![]));
        assert_eq!(report.events.first(), Some(&AttentionEvent::VisibleCountChanged { count: 0 }));
        assert_eq!(t.person(PersonId(1)).unwrap().screen(), ScreenId(1));

        let report = t.update(&frame(7.0, vec![at(1, LEFT)]));
        assert!(!report
            .events
            .iter()
            .any(|e| matches!(e, AttentionEvent::ScreenWatchedChanged { .. })));
        assert_eq!(interest_events(&report), vec![Interest::Engaged]);
    }

    #[test]
    fn test_untracked_face_is_skipped() {
        let mut t = tracker();
        let mut person = at(1, LEFT);
        person.face_tracked = false;

        let report = t.update(&frame(0.0, vec![person.clone()]));
        assert_eq!(report.events, vec![AttentionEvent::VisibleCountChanged { count: 1 }]);
        assert!(report.gaze.is_empty());
        assert_eq!(t.person(PersonId(1)).unwrap().screen(), ScreenId::NONE);
    }

    #[test]
    fn test_face_flicker_is_smoothed() {
        let mut t = tracker();
        t.update(&frame(0.0, vec![at(1, LEFT)]));

        let mut flicker = at(1, LEFT);
        flicker.face_tracked = false;
        let report = t.update(&frame(0.1, vec![flicker.clone()]));
        assert_eq!(report.gaze.len(), 1);
        assert!(report.events.is_empty());

        t.update(&frame(0.2, vec![flicker.clone()]));
        let report = t.update(&frame(0.3, vec![flicker]));
        assert!(report.gaze.is_empty());
        assert_eq!(
            report.events,
            vec![AttentionEvent::FaceTrackedChanged { persons: vec![] }]
        );
    }

    #[test]
    fn test_invisible_and_duplicate_persons_ignored() {
        let mut t = tracker();
        let mut hidden = at(2, LEFT);
        hidden.tracked = false;
        let duplicate = at(1, RIGHT);

        let report = t.update(&frame(0.0, vec![at(1, LEFT), hidden, duplicate]));
        assert_eq!(report.events[0], AttentionEvent::VisibleCountChanged { count: 1 });
        assert_eq!(report.gaze.len(), 1);
        assert_eq!(report.gaze[0].screen, ScreenId(1));
        assert!(t.person(PersonId(2)).is_none());
    }

    #[test]
    fn test_forget_and_reset() {
        let mut t = tracker();
        t.update(&frame(0.0, vec![at(1, LEFT), at(2, LEFT)]));
        assert!(t.is_joint_attention());

        assert!(t.forget(PersonId(2)));
        assert!(!t.forget(PersonId(2)));
        assert!(t.person(PersonId(2)).is_none());

        t.reset();
        assert!(t.person(PersonId(1)).is_none());
        assert!(!t.is_joint_attention());
        assert!(t.face_tracked().is_empty());

        let report = t.update(&frame(1.0, vec![at(1, LEFT), at(2, LEFT)]));
        assert!(report
            .events
            .contains(&AttentionEvent::JointAttentionStart { screen: ScreenId(1) }));
    }
}
