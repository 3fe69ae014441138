//! Circle / Line Segment Intersection
//!
//! The segment is parametrized as `p1 + t * (p2 - p1)` with `t` in `[0, 1]`;
//! substituting into the circle equation gives `a*t^2 + b*t + c = 0`.
//!
//! # Example
//!
//! ```rust
//! use pursuit_library::algorithms::intersection::circle_segment_intersections;
//! use pursuit_library::Point2;
//!
//! let hits = circle_segment_intersections(
//!     Point2::new(0.0, 0.0),
//!     15.0,
//!     Point2::new(0.0, 0.0),
//!     Point2::new(100.0, 0.0),
//! );
//! assert_eq!(hits.len(), 1);
//! assert!((hits[0].x - 15.0).abs() < 1e-9);
//! ```

use crate::messages::Point2;
use smallvec::SmallVec;

/// At most two hits per segment, kept inline
pub type Hits<T> = SmallVec<[T; 2]>;

/// Parameters `t` in `[0, 1]` where the circle crosses the segment
///
/// Roots come back in ascending order. A tangent contact yields a single root.
/// A zero-length segment (`a == 0`) yields none.
pub fn circle_segment_params(center: Point2, radius: f64, p1: Point2, p2: Point2) -> Hits<f64> {
    let d = p1.to(p2);
    let f = center.to(p1);

    let a = d.dot(d);
    let b = 2.0 * f.dot(d);
    let c = f.dot(f) - radius * radius;

    let mut roots = Hits::new();
    if a < f64::EPSILON {
        return roots;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return roots;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    if (0.0..=1.0).contains(&t1) {
        roots.push(t1);
    }
    if t2 != t1 && (0.0..=1.0).contains(&t2) {
        roots.push(t2);
    }
    roots
}

/// Points where the circle crosses the segment
pub fn circle_segment_intersections(
    center: Point2,
    radius: f64,
    p1: Point2,
    p2: Point2,
) -> Hits<Point2> {
    circle_segment_params(center, radius, p1, p2)
        .into_iter()
        .map(|t| p1.lerp(p2, t))
        .collect()
}

/// Shortest distance from `point` to the segment `p1`-`p2`
pub fn distance_to_segment(point: Point2, p1: Point2, p2: Point2) -> f64 {
    let d = p1.to(p2);
    let len_sq = d.dot(d);
    if len_sq < f64::EPSILON {
        return point.distance(p1);
    }
    let t = (p1.to(point).dot(d) / len_sq).clamp(0.0, 1.0);
    point.distance(p1.lerp(p2, t))
}
