//! Screen entity and single-screen intersection

use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{GazeRay, Meters, Millimeters, PositionM, PositionMm};
use crate::ScreenConfigError;

/// Below this magnitude the co-planarity denominator is treated as zero
/// (ray parallel to the screen plane).
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Screen identifier as configured. `0` is reserved for "no screen".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(pub u32);

impl ScreenId {
    /// Watching no screen
    pub const NONE: ScreenId = ScreenId(0);

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output resolution (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub x: u32,
    pub y: u32,
}

/// Mounting angles in degrees. Carried from configuration, not used by
/// the intersection math.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Fractional position inside a screen rectangle, both in `[0, 1]`,
/// measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalPoint {
    pub u: f64,
    pub v: f64,
}

/// A physical display screen. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    id: ScreenId,
    center: PositionM,
    width: Meters,
    height: Meters,
    resolution: Resolution,
    orientation: Orientation,
}

impl Screen {
    /// Build a screen from millimeter measurements.
    ///
    /// This is where screen geometry is converted to meters.
    pub fn new(
        id: ScreenId,
        center: PositionMm,
        width: Millimeters,
        height: Millimeters,
        resolution: Resolution,
        orientation: Orientation,
    ) -> Result<Self, ScreenConfigError> {
        if id.is_none() {
            return Err(ScreenConfigError::ReservedId);
        }
        if !(width.0.is_finite() && width.0 > 0.0) {
            return Err(ScreenConfigError::InvalidDimension {
                id: id.0,
                field: "width",
                value: width.0,
            });
        }
        if !(height.0.is_finite() && height.0 > 0.0) {
            return Err(ScreenConfigError::InvalidDimension {
                id: id.0,
                field: "height",
                value: height.0,
            });
        }
        if resolution.x == 0 {
            return Err(ScreenConfigError::InvalidDimension {
                id: id.0,
                field: "resolutionX",
                value: 0.0,
            });
        }
        if resolution.y == 0 {
            return Err(ScreenConfigError::InvalidDimension {
                id: id.0,
                field: "resolutionY",
                value: 0.0,
            });
        }
        if !(center.x.is_finite() && center.y.is_finite() && center.z.is_finite()) {
            return Err(ScreenConfigError::InvalidDimension {
                id: id.0,
                field: "center",
                value: f64::NAN,
            });
        }

        Ok(Self {
            id,
            center: center.to_meters(),
            width: width.to_meters(),
            height: height.to_meters(),
            resolution,
            orientation,
        })
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    /// Center in the sensor frame (meters, as configured: Y not inverted)
    pub fn center(&self) -> PositionM {
        self.center
    }

    pub fn width(&self) -> Meters {
        self.width
    }

    pub fn height(&self) -> Meters {
        self.height
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Screen center in the gaze frame, where the configured Y is inverted
    pub fn gaze_center(&self) -> PositionM {
        PositionM::new(self.center.x, -self.center.y, self.center.z)
    }

    fn left(&self) -> f64 {
        self.center.x - self.width.0 / 2.0
    }

    fn right(&self) -> f64 {
        self.center.x + self.width.0 / 2.0
    }

    fn top(&self) -> f64 {
        -self.center.y - self.height.0 / 2.0
    }

    fn bottom(&self) -> f64 {
        -self.center.y + self.height.0 / 2.0
    }

    /// Top-left, bottom-left and bottom-right corners in the gaze frame
    pub fn corners(&self) -> [Vector3<f64>; 3] {
        let z = self.center.z;
        [
            Vector3::new(self.left(), self.top(), z),
            Vector3::new(self.left(), self.bottom(), z),
            Vector3::new(self.right(), self.bottom(), z),
        ]
    }

    /// Intersect the gaze line with this screen's plane.
    ///
    /// `t` is the ratio of two 4x4 determinants (co-planarity of the three
    /// corners with a point on the line). Returns `None` when the line is
    /// parallel to the plane or the result is not finite.
    pub fn plane_intersection(&self, ray: &GazeRay) -> Option<PositionM> {
        let [p1, p2, p3] = self.corners();
        let p4 = ray.origin.to_vector();
        let d = ray.direction();

        #[rustfmt::skip]
        let numerator = Matrix4::new(
            1.0,  1.0,  1.0,  1.0,
            p1.x, p2.x, p3.x, p4.x,
            p1.y, p2.y, p3.y, p4.y,
            p1.z, p2.z, p3.z, p4.z,
        );
        #[rustfmt::skip]
        let denominator = Matrix4::new(
            1.0,  1.0,  1.0,  0.0,
            p1.x, p2.x, p3.x, d.x,
            p1.y, p2.y, p3.y, d.y,
            p1.z, p2.z, p3.z, d.z,
        );

        let det_denominator = denominator.determinant();
        if !det_denominator.is_finite() || det_denominator.abs() < DEGENERATE_EPSILON {
            return None;
        }

        let t = -(numerator.determinant() / det_denominator);
        if !t.is_finite() {
            return None;
        }

        Some(PositionM::from_vector(p4 + d * t))
    }

    /// Local fractions of a plane point if it lies strictly inside the
    /// rectangle (open bounds on both axes).
    pub fn local_point(&self, point: &PositionM) -> Option<LocalPoint> {
        let inside = point.x > self.left()
            && point.x < self.right()
            && point.y > self.top()
            && point.y < self.bottom();
        if !inside {
            return None;
        }

        Some(LocalPoint {
            u: ((point.x - self.left()) / self.width.0).abs(),
            v: ((point.y - self.top()) / self.height.0).abs(),
        })
    }
}

/// Result of a successful gaze / screen intersection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenHit {
    /// Configured id of the watched screen
    pub screen_id: ScreenId,
    /// Position of the screen in registration order (0-based)
    pub index: usize,
    /// Intersection point in the gaze frame (meters)
    pub point: PositionM,
    /// Position inside the screen rectangle
    pub local: LocalPoint,
    /// Output resolution of the screen, for pixel mapping
    pub resolution: Resolution,
}

impl ScreenHit {
    /// Pixel coordinates of the hit, origin at the top-left pixel
    pub fn pixel(&self) -> (f64, f64) {
        (
            self.local.u * self.resolution.x as f64,
            self.local.v * self.resolution.y as f64,
        )
    }
}
