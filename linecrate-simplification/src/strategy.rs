//! Error metrics for vertex removal
//!
//! A strategy scores the cost of removing a vertex given its two current
//! neighbors. The decimation driver removes the cheapest vertex first and
//! never removes one whose cost exceeds the configured maximum error.

use linecrate_core::{Point3d, Vector3d};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// Cost of removing a vertex from a polyline.
pub trait DecimationStrategy: Debug + Send + Sync {
    /// Non-negative cost of removing `point`, whose live neighbors are `prev` and `next`.
    fn compute_error(&self, prev: &Point3d, point: &Point3d, next: &Point3d) -> f64;

    fn name(&self) -> &'static str;
}

/// Perpendicular distance to the chord joining the neighbors.
///
/// The error is in world-coordinate units.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceStrategy;

impl DecimationStrategy for DistanceStrategy {
    fn compute_error(&self, prev: &Point3d, point: &Point3d, next: &Point3d) -> f64 {
        if (next - prev).norm_squared() == 0.0 {
            return 0.0;
        }
        perpendicular_distance(point, prev, next)
    }

    fn name(&self) -> &'static str {
        "distance"
    }
}

/// Deviation from a straight continuation, in radians.
///
/// A vertex the line passes straight through costs 0, a hairpin costs π.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleStrategy;

impl DecimationStrategy for AngleStrategy {
    fn compute_error(&self, prev: &Point3d, point: &Point3d, next: &Point3d) -> f64 {
        let to_prev = prev - point;
        let to_next = next - point;
        if to_prev.norm_squared() == 0.0 || to_next.norm_squared() == 0.0 {
            return 0.0;
        }
        std::f64::consts::PI - to_prev.angle(&to_next)
    }

    fn name(&self) -> &'static str {
        "angle"
    }
}

/// Serializable selector for the built-in strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Distance,
    Angle,
}

impl StrategyKind {
    pub fn build(self) -> Arc<dyn DecimationStrategy> {
        match self {
            StrategyKind::Distance => Arc::new(DistanceStrategy),
            StrategyKind::Angle => Arc::new(AngleStrategy),
        }
    }
}

/// Distance from `point` to the infinite line through `a` and `b`.
///
/// Uses |(b - a) × (point - a)| / |b - a|. When `a` and `b` coincide the
/// line is undefined and the distance from `point` to `a` is returned.
pub fn perpendicular_distance(point: &Point3d, a: &Point3d, b: &Point3d) -> f64 {
    let direction: Vector3d = b - a;
    let offset: Vector3d = point - a;
    let length_sq = direction.norm_squared();
    if length_sq == 0.0 {
        return offset.norm();
    }
    direction.cross(&offset).norm() / length_sq.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_perpendicular_distance_on_axis() {
        let d = perpendicular_distance(
            &Point3d::new(1.0, 3.0, 0.0),
            &Point3d::new(0.0, 0.0, 0.0),
            &Point3d::new(2.0, 0.0, 0.0),
        );
        assert_relative_eq!(d, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_perpendicular_distance_is_to_line_not_segment() {
        // Beyond the end of the segment: still measured to the infinite line.
        let d = perpendicular_distance(
            &Point3d::new(10.0, 2.0, 0.0),
            &Point3d::new(0.0, 0.0, 0.0),
            &Point3d::new(1.0, 0.0, 0.0),
        );
        assert_relative_eq!(d, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_perpendicular_distance_3d_diagonal() {
        // Point (0, 0, 1) against the line through the origin along (1, 1, 0).
        let d = perpendicular_distance(
            &Point3d::new(0.0, 0.0, 1.0),
            &Point3d::new(0.0, 0.0, 0.0),
            &Point3d::new(1.0, 1.0, 0.0),
        );
        assert_relative_eq!(d, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_strategy_coincident_neighbors_is_free() {
        let p = Point3d::new(1.0, 1.0, 0.0);
        let err = DistanceStrategy.compute_error(&p, &Point3d::new(5.0, 5.0, 5.0), &p);
        assert_eq!(err, 0.0);
    }

    #[test]
    fn test_distance_strategy_collinear_is_zero() {
        let err = DistanceStrategy.compute_error(
            &Point3d::new(0.0, 0.0, 0.0),
            &Point3d::new(1.0, 1.0, 1.0),
            &Point3d::new(3.0, 3.0, 3.0),
        );
        assert_relative_eq!(err, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_strategy() {
        let origin = Point3d::new(0.0, 0.0, 0.0);
        let straight = AngleStrategy.compute_error(
            &Point3d::new(-1.0, 0.0, 0.0),
            &origin,
            &Point3d::new(1.0, 0.0, 0.0),
        );
        assert_relative_eq!(straight, 0.0, epsilon = 1e-12);

        let corner = AngleStrategy.compute_error(
            &Point3d::new(-1.0, 0.0, 0.0),
            &origin,
            &Point3d::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(corner, FRAC_PI_2, epsilon = 1e-12);

        let hairpin = AngleStrategy.compute_error(
            &Point3d::new(1.0, 0.0, 0.0),
            &origin,
            &Point3d::new(2.0, 0.0, 0.0),
        );
        assert_relative_eq!(hairpin, PI, epsilon = 1e-12);

        let degenerate = AngleStrategy.compute_error(&origin, &origin, &Point3d::new(1.0, 0.0, 0.0));
        assert_eq!(degenerate, 0.0);
    }

    #[test]
    fn test_strategy_kind_build() {
        assert_eq!(StrategyKind::default(), StrategyKind::Distance);
        assert_eq!(StrategyKind::Distance.build().name(), "distance");
        assert_eq!(StrategyKind::Angle.build().name(), "angle");
    }
}
