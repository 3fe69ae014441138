//! Planar geometry primitives
//!
//! World coordinates are canvas units; headings are radians measured from the
//! +x axis and kept in (-PI, PI].

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Wrap an angle into (-PI, PI]
///
/// Angles already in range are returned unchanged, which makes the function
/// exactly idempotent.
pub fn normalize_angle(angle: f64) -> f64 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// A point (or free vector) in the world plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point2) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Vector from `self` to `other`
    pub fn to(&self, other: Point2) -> Point2 {
        Point2::new(other.x - self.x, other.y - self.y)
    }

    pub fn dot(&self, other: Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction of this vector, `atan2(y, x)`
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Linear interpolation, `self + t * (other - self)`
    pub fn lerp(&self, other: Point2, t: f64) -> Point2 {
        Point2::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Robot pose in the world frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    /// Heading in radians, (-PI, PI]
    pub theta: f64,
}

impl Pose2D {
    /// Create a pose, normalizing the heading
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Unit vector along the heading
    pub fn heading_vector(&self) -> Point2 {
        Point2::new(self.theta.cos(), self.theta.sin())
    }

    /// Whether `point` lies strictly in front of the robot
    ///
    /// A point exactly abeam (zero dot product) is not ahead.
    pub fn is_ahead(&self, point: Point2) -> bool {
        self.heading_vector().dot(self.position().to(point)) > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_in_range_is_identity() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(1.0), 1.0);
        assert_eq!(normalize_angle(PI), PI);
    }

    #[test]
    fn test_normalize_boundaries() {
        // -PI maps onto the closed end of the interval
        assert_relative_eq!(normalize_angle(-PI), PI);
        assert_relative_eq!(normalize_angle(1.5 * PI), -PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(TAU), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_negative_wrap() {
        // -4 rad is a small counter-clockwise angle past -PI
        assert_relative_eq!(normalize_angle(-4.0), TAU - 4.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-PI / 2.0 - TAU), -PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_point_helpers() {
        let a = Point2::new(1.0, 1.0);
        let b = Point2::new(4.0, 5.0);
        assert_relative_eq!(a.distance(b), 5.0);
        assert_eq!(a.to(b), Point2::new(3.0, 4.0));
        assert_relative_eq!(a.to(b).norm(), 5.0);
        assert_eq!(a.lerp(b, 0.5), Point2::new(2.5, 3.0));
        assert!(!Point2::new(f64::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_is_ahead() {
        let pose = Pose2D::new(0.0, 0.0, 0.0);
        assert!(pose.is_ahead(Point2::new(10.0, 0.0)));
        assert!(!pose.is_ahead(Point2::new(-10.0, 0.0)));
        assert!(!pose.is_ahead(Point2::new(0.0, 10.0)));

        let facing_up = Pose2D::new(5.0, 5.0, PI / 2.0);
        assert!(facing_up.is_ahead(Point2::new(5.0, 6.0)));
        assert!(!facing_up.is_ahead(Point2::new(5.0, 4.0)));
    }

    proptest! {
        #[test]
        fn normalize_lands_in_half_open_range(theta in -1.0e4..1.0e4f64) {
            let n = normalize_angle(theta);
            prop_assert!(n > -PI && n <= PI);
        }

        #[test]
        fn normalize_is_idempotent(theta in -1.0e4..1.0e4f64) {
            let n = normalize_angle(theta);
            prop_assert_eq!(normalize_angle(n), n);
        }

        #[test]
        fn normalize_preserves_direction(theta in -100.0..100.0f64) {
            let n = normalize_angle(theta);
            prop_assert!((n.cos() - theta.cos()).abs() < 1e-9);
            prop_assert!((n.sin() - theta.sin()).abs() < 1e-9);
        }
    }
}
