//! Integration tests for linecrate-simplification
//!
//! These tests run the decimation filter end to end on small polyline sets
//! and check the documented decimation scenarios.

use linecrate_core::{AttributeArray, Point3d, PolylineSet};
use linecrate_simplification::*;
use std::sync::Arc;

/// Open line through five exactly collinear points
fn create_collinear_line() -> PolylineSet {
    let points = (0..5)
        .map(|i| Point3d::new(i as f64 * 0.5, i as f64 * 1.5, -(i as f64)))
        .collect::<Vec<_>>();
    PolylineSet::from_points_and_lines(points, vec![vec![0, 1, 2, 3, 4]])
}

/// Unit square as a closed loop
fn create_square_loop() -> PolylineSet {
    let points = vec![
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(1.0, 0.0, 0.0),
        Point3d::new(1.0, 1.0, 0.0),
        Point3d::new(0.0, 1.0, 0.0),
    ];
    PolylineSet::from_points_and_lines(points, vec![vec![0, 1, 2, 3, 0]])
}

/// A circle sampled at `n` points as a closed loop
fn create_circle(n: usize, radius: f64) -> PolylineSet {
    let points = (0..n)
        .map(|i| {
            let t = i as f64 / n as f64 * std::f64::consts::TAU;
            Point3d::new(radius * t.cos(), radius * t.sin(), 0.0)
        })
        .collect::<Vec<_>>();
    let mut line: Vec<usize> = (0..n).collect();
    line.push(0);
    PolylineSet::from_points_and_lines(points, vec![line])
}

/// Two open lines meeting at point 7
fn create_junction() -> PolylineSet {
    let mut points = vec![Point3d::origin(); 12];
    for (i, p) in points.iter_mut().enumerate().take(8) {
        *p = Point3d::new(i as f64, 0.0, 0.0);
    }
    points[8] = Point3d::new(7.0, 1.0, 0.0);
    points[9] = Point3d::new(7.0, 2.0, 0.0);
    points[10] = Point3d::new(7.0, 3.0, 0.0);
    points[11] = Point3d::new(100.0, 100.0, 100.0);
    PolylineSet::from_points_and_lines(
        points,
        vec![vec![0, 1, 2, 3, 4, 5, 6, 7], vec![7, 8, 9, 10]],
    )
}

#[test]
fn test_collinear_line_collapses_to_endpoints() {
    let set = create_collinear_line();
    let result = DecimatePolylineFilter::new()
        .with_target_reduction(1.0)
        .with_maximum_error(0.0)
        .execute(&set)
        .unwrap();

    assert_eq!(result.output.lines, vec![vec![0, 1]]);
    assert_eq!(result.point_map.get(0), Some(0));
    assert_eq!(result.point_map.get(4), Some(1));
    assert_eq!(result.output.points.get(1), set.points.get(4));
}

#[test]
fn test_square_loop_becomes_triangle() {
    let set = create_square_loop();
    let result = DecimatePolylineFilter::new()
        .with_target_reduction(0.99)
        .execute(&set)
        .unwrap();

    let line = &result.output.lines[0];
    assert_eq!(line.len(), 4);
    assert_eq!(line.first(), line.last());
    assert_eq!(result.output.point_count(), 3);
    assert_eq!(result.reports[0].stop, StopReason::MinimumSize);
}

#[test]
fn test_offset_apex_within_tolerance_is_kept() {
    let d = 0.3;
    let set = PolylineSet::from_points_and_lines(
        vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(0.5, 0.0, d),
            Point3d::new(1.0, 0.0, 0.0),
        ],
        vec![vec![0, 1, 2]],
    );
    let result = DecimatePolylineFilter::new()
        .with_target_reduction(1.0)
        .with_maximum_error(d / 2.0)
        .execute(&set)
        .unwrap();

    assert_eq!(result.output.lines, vec![vec![0, 1, 2]]);
    assert_eq!(result.output.points, set.points);
    assert_eq!(result.reports[0].stop, StopReason::QueueExhausted);
}

#[test]
fn test_shared_junction_point_maps_once() {
    let set = create_junction();
    let result = DecimatePolylineFilter::new()
        .with_target_reduction(1.0)
        .execute(&set)
        .unwrap();

    let junction = result.point_map.get(7).unwrap();
    assert_eq!(result.output.lines[0].last(), Some(&junction));
    assert_eq!(result.output.lines[1].first(), Some(&junction));
    assert_eq!(result.output.lines, vec![vec![0, 1], vec![1, 2]]);
    // Unreferenced points are dropped.
    assert_eq!(result.point_map.get(11), None);
    assert_eq!(result.output.point_count(), 3);
}

#[test]
fn test_zero_reduction_is_identity() {
    let set = create_junction();
    let result = DecimatePolylineFilter::new()
        .with_target_reduction(0.0)
        .execute(&set)
        .unwrap();

    let restored: Vec<Vec<usize>> = result
        .output
        .lines
        .iter()
        .map(|line| {
            line.iter()
                .map(|&out| result.point_map.iter().find(|&(_, o)| o == out).unwrap().0)
                .collect()
        })
        .collect();
    assert_eq!(restored, set.lines);
    assert_eq!(result.stats.removed_vertices, 0);
}

#[test]
fn test_circle_respects_maximum_error() {
    let set = create_circle(64, 10.0);
    let tolerance = 0.5;
    let result = DecimatePolylineFilter::new()
        .with_target_reduction(1.0)
        .with_maximum_error(tolerance)
        .execute(&set)
        .unwrap();

    let line = &result.output.lines[0];
    assert!(line.len() < 65);
    assert!(line.len() >= 4);
    assert_eq!(line.first(), line.last());
    assert!(result.stats.max_removed_error <= tolerance);
}

#[test]
fn test_angle_strategy_through_filter() {
    let set = create_circle(36, 1.0);
    // Each vertex of a 36-gon turns by 10 degrees.
    let result = DecimatePolylineFilter::new()
        .with_target_reduction(1.0)
        .with_strategy(StrategyKind::Angle)
        .with_maximum_error(0.01)
        .execute(&set)
        .unwrap();
    assert_eq!(result.stats.removed_vertices, 0);

    let result = DecimatePolylineFilter::new()
        .with_target_reduction(0.5)
        .with_strategy(StrategyKind::Angle)
        .execute(&set)
        .unwrap();
    assert_eq!(result.output.lines[0].len(), 19);
}

#[derive(Debug)]
struct ZFlatteningStrategy;

impl DecimationStrategy for ZFlatteningStrategy {
    fn compute_error(&self, _prev: &Point3d, point: &Point3d, _next: &Point3d) -> f64 {
        point.z.abs()
    }

    fn name(&self) -> &'static str {
        "z-height"
    }
}

#[test]
fn test_custom_strategy() {
    let set = PolylineSet::from_points_and_lines(
        vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 5.0, 0.0),
            Point3d::new(2.0, 0.0, 1.0),
            Point3d::new(3.0, -5.0, 0.0),
            Point3d::new(4.0, 0.0, 0.0),
        ],
        vec![vec![0, 1, 2, 3, 4]],
    );
    let result = DecimatePolylineFilter::new()
        .with_target_reduction(1.0)
        .with_maximum_error(0.5)
        .with_strategy_impl(Arc::new(ZFlatteningStrategy))
        .execute(&set)
        .unwrap();
    assert_eq!(result.reports[0].point_ids, vec![0, 2, 4]);
}

#[test]
fn test_attributes_survive_decimation() {
    let mut set = create_junction();
    let n = set.point_count();
    set.point_data.add_array(
        AttributeArray::from_values(
            "normals",
            3,
            (0..n).flat_map(|i| [i as f64, 0.0, 1.0]).collect(),
        )
        .unwrap(),
    );
    set.line_data
        .add_array(AttributeArray::from_values("road", 1, vec![11.0, 22.0]).unwrap());

    let result = DecimatePolylineFilter::new()
        .with_target_reduction(1.0)
        .execute(&set)
        .unwrap();

    let normals = result.output.point_data.array("normals").unwrap();
    assert_eq!(normals.tuple_count(), result.output.point_count());
    let junction = result.point_map.get(7).unwrap();
    assert_eq!(normals.tuple(junction), Some(&[7.0, 0.0, 1.0][..]));
    assert_eq!(result.output.line_data.array("road").unwrap().values, vec![11.0, 22.0]);
}

#[test]
fn test_degenerate_lines_pass_through() {
    let set = PolylineSet::from_points_and_lines(
        vec![Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 1.0, 1.0)],
        vec![vec![], vec![1], vec![0, 1], vec![0, 0]],
    );
    let result = DecimatePolylineFilter::new()
        .with_target_reduction(1.0)
        .execute(&set)
        .unwrap();
    assert_eq!(result.output.lines, vec![vec![], vec![0], vec![1, 0], vec![1, 1]]);
    assert!(result
        .reports
        .iter()
        .all(|r| r.stop == StopReason::PassThrough));
}
