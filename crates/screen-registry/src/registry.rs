//! Ordered screen set and first-hit intersection

use std::collections::HashSet;
use tracing::info;

use crate::geometry::GazeRay;
use crate::screen::{Screen, ScreenHit, ScreenId};
use crate::ScreenConfigError;

/// Owns every configured screen, in registration order.
///
/// Queries take `&self`: nothing is written during an intersection, so the
/// same ray against the same registry always yields the same result.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenRegistry {
    screens: Vec<Screen>,
}

impl ScreenRegistry {
    /// Create a registry, rejecting an empty set and duplicate ids
    pub fn new(screens: Vec<Screen>) -> Result<Self, ScreenConfigError> {
        if screens.is_empty() {
            return Err(ScreenConfigError::Empty);
        }

        let mut seen = HashSet::new();
        for screen in &screens {
            if !seen.insert(screen.id()) {
                return Err(ScreenConfigError::DuplicateId(screen.id().0));
            }
        }

        Ok(Self { screens })
    }

    /// First screen, in registration order, whose rectangle contains the
    /// intersection of `ray` with its plane.
    pub fn intersect(&self, ray: &GazeRay) -> Option<ScreenHit> {
        self.screens.iter().enumerate().find_map(|(index, screen)| {
            let point = screen.plane_intersection(ray)?;
            let local = screen.local_point(&point)?;
            Some(ScreenHit {
                screen_id: screen.id(),
                index,
                point,
                local,
                resolution: screen.resolution(),
            })
        })
    }

    /// Watched screen id, `ScreenId::NONE` on a miss
    pub fn watched_screen(&self, ray: &GazeRay) -> ScreenId {
        self.intersect(ray)
            .map(|hit| hit.screen_id)
            .unwrap_or(ScreenId::NONE)
    }

    pub fn get(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.iter().find(|s| s.id() == id)
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Log every screen (id, size, resolution)
    pub fn log_summary(&self) {
        info!("Loaded {} screen(s)", self.screens.len());
        for screen in &self.screens {
            info!(
                "Screen {}: size {:.3}m x {:.3}m, resolution {}x{}, center ({:.3}, {:.3}, {:.3})",
                screen.id(),
                screen.width().0,
                screen.height().0,
                screen.resolution().x,
                screen.resolution().y,
                screen.center().x,
                screen.center().y,
                screen.center().z,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Millimeters, PositionM, PositionMm};
    use crate::screen::{Orientation, Resolution};
    use proptest::prelude::*;

    fn screen(id: u32, center: (f64, f64, f64), w: f64, h: f64) -> Screen {
        Screen::new(
            ScreenId(id),
            PositionMm::new(center.0, center.1, center.2),
            Millimeters(w),
            Millimeters(h),
            Resolution { x: 1920, y: 1080 },
            Orientation::default(),
        )
        .unwrap()
    }

    fn ray_through(origin: PositionM, target: PositionM) -> GazeRay {
        GazeRay::new(origin, target)
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(matches!(
            ScreenRegistry::new(vec![]),
            Err(ScreenConfigError::Empty)
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ScreenRegistry::new(vec![
            screen(4, (0.0, 0.0, 0.0), 1000.0, 600.0),
            screen(4, (2000.0, 0.0, 0.0), 1000.0, 600.0),
        ]);
        assert!(matches!(result, Err(ScreenConfigError::DuplicateId(4))));
    }

    #[test]
    fn test_hits_second_screen() {
        let registry = ScreenRegistry::new(vec![
            screen(1, (-1500.0, 0.0, 0.0), 1000.0, 600.0),
            screen(2, (1500.0, 0.0, 0.0), 1000.0, 600.0),
        ])
        .unwrap();

        let ray = ray_through(PositionM::new(0.0, 0.0, 2.0), PositionM::new(1.5, 0.0, 0.0));
        let hit = registry.intersect(&ray).unwrap();
        assert_eq!(hit.screen_id, ScreenId(2));
        assert_eq!(hit.index, 1);
        assert!((hit.local.u - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_first_match_wins() {
        // Same rectangle at two depths: the line crosses both planes
        let registry = ScreenRegistry::new(vec![
            screen(7, (0.0, 0.0, -500.0), 1000.0, 600.0),
            screen(3, (0.0, 0.0, 0.0), 1000.0, 600.0),
        ])
        .unwrap();

        let ray = ray_through(PositionM::new(0.0, 0.0, 2.0), PositionM::new(0.0, 0.0, 1.0));
        assert_eq!(registry.watched_screen(&ray), ScreenId(7));
    }

    #[test]
    fn test_miss_is_none_screen() {
        let registry = ScreenRegistry::new(vec![screen(1, (0.0, 0.0, 0.0), 1000.0, 600.0)]).unwrap();
        let ray = ray_through(PositionM::new(0.0, 0.0, 2.0), PositionM::new(3.0, 0.0, 0.0));
        assert_eq!(registry.intersect(&ray), None);
        assert_eq!(registry.watched_screen(&ray), ScreenId::NONE);
    }

    #[test]
    fn test_parallel_ray_falls_through_to_next_screen() {
        // Crosses screen 1's plane outside its rectangle, then screen 2 is tried
        let registry = ScreenRegistry::new(vec![
            screen(1, (0.0, 0.0, 0.0), 1000.0, 600.0),
            screen(2, (0.0, 3000.0, 0.0), 1000.0, 600.0),
        ])
        .unwrap();
        let ray = ray_through(PositionM::new(0.0, -3.0, 2.0), PositionM::new(0.0, -3.0, 1.0));
        assert_eq!(registry.watched_screen(&ray), ScreenId(2));

        // Fully parallel to every plane
        let flat = ray_through(PositionM::new(0.0, 0.0, 2.0), PositionM::new(0.0, 1.0, 2.0));
        assert_eq!(registry.intersect(&flat), None);
    }

    #[test]
    fn test_lookup() {
        let registry = ScreenRegistry::new(vec![
            screen(1, (0.0, 0.0, 0.0), 1000.0, 600.0),
            screen(9, (2000.0, 0.0, 0.0), 500.0, 300.0),
        ])
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert_eq!(registry.get(ScreenId(9)).map(|s| s.id()), Some(ScreenId(9)));
        assert!(registry.get(ScreenId(5)).is_none());
    }

    proptest! {
        #[test]
        fn test_center_ray_hits_middle(
            width in 100.0f64..3000.0,
            height in 100.0f64..3000.0,
            cx in -2000.0f64..2000.0,
            cy in -2000.0f64..2000.0,
            cz in -500.0f64..500.0,
            hx in -3.0f64..3.0,
            hy in -3.0f64..3.0,
            depth in 0.5f64..5.0,
        ) {
            let s = screen(1, (cx, cy, cz), width, height);
            let center = s.gaze_center();
            let registry = ScreenRegistry::new(vec![s]).unwrap();
            let head = PositionM::new(hx, hy, center.z + depth);

            let hit = registry.intersect(&ray_through(head, center));
            prop_assert!(hit.is_some());
            let hit = hit.unwrap();
            prop_assert_eq!(hit.screen_id, ScreenId(1));
            prop_assert!((hit.local.u - 0.5).abs() < 1e-6);
            prop_assert!((hit.local.v - 0.5).abs() < 1e-6);
        }

        #[test]
        fn test_outside_ray_misses(
            width in 100.0f64..3000.0,
            height in 100.0f64..3000.0,
            margin in 0.05f64..2.0,
            side in 0usize..4,
            along in -0.45f64..0.45,
            depth in 0.5f64..5.0,
        ) {
            let s = screen(1, (0.0, 0.0, 0.0), width, height);
            let (w, h) = (s.width().0, s.height().0);
            let target = match side {
                0 => PositionM::new(w / 2.0 + margin, along * h, 0.0),
                1 => PositionM::new(-w / 2.0 - margin, along * h, 0.0),
                2 => PositionM::new(along * w, h / 2.0 + margin, 0.0),
                _ => PositionM::new(along * w, -h / 2.0 - margin, 0.0),
            };
            let registry = ScreenRegistry::new(vec![s]).unwrap();
            let head = PositionM::new(0.3, -0.2, depth);
            prop_assert_eq!(registry.intersect(&ray_through(head, target)), None);
        }

        #[test]
        fn test_intersect_is_idempotent(
            hx in -2.0f64..2.0,
            hy in -2.0f64..2.0,
            tx in -2.0f64..2.0,
            ty in -2.0f64..2.0,
        ) {
            let registry = ScreenRegistry::new(vec![
                screen(1, (-600.0, 0.0, 0.0), 1000.0, 600.0),
                screen(2, (600.0, 0.0, 0.0), 1000.0, 600.0),
            ])
            .unwrap();
            let ray = ray_through(PositionM::new(hx, hy, 2.5), PositionM::new(tx, ty, 0.0));
            let first = registry.intersect(&ray);
            let second = registry.intersect(&ray);
            prop_assert_eq!(first, second);
        }
    }
}
