//! Greedy polyline decimation
//!
//! Each polyline is decimated independently: every removable vertex is scored
//! by a [`DecimationStrategy`], the cheapest vertex is removed, and its two
//! former neighbors are rescored. Decimation of a polyline stops when the
//! target reduction is met, the polyline is down to its minimum size, or no
//! remaining vertex can be removed within the maximum error.

use crate::polyline::Polyline;
use crate::strategy::DecimationStrategy;
use linecrate_core::PointSource;
use priority_queue::PriorityQueue;
use std::cmp::Ordering;
use tracing::{debug, trace};

// ============================================================
// Removal Cost for Priority Queue
// ============================================================

#[derive(Debug, Clone, Copy)]
struct RemovalCost {
    error: f64,
    index: usize,
}

impl PartialEq for RemovalCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for RemovalCost {}

impl PartialOrd for RemovalCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RemovalCost {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smallest error first, ties go to the lowest vertex index
        other
            .error
            .total_cmp(&self.error)
            .then_with(|| other.index.cmp(&self.index))
    }
}

// ============================================================
// Results
// ============================================================

/// One vertex removed during decimation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Removal {
    pub point_id: usize,
    /// Error of the vertex at the moment it was removed
    pub error: f64,
}

/// Why decimation of a polyline ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Too short to decimate, or a zero target reduction
    PassThrough,
    TargetReached,
    /// Down to 2 vertices (open) or 3 (loop)
    MinimumSize,
    /// No vertex left within the maximum error
    QueueExhausted,
}

/// Surviving point ids of one decimated polyline
#[derive(Debug, Clone, PartialEq)]
pub struct DecimatedPolyline {
    /// Global point ids in input order; loops end with their first id
    pub point_ids: Vec<usize>,
    pub original_len: usize,
    pub is_loop: bool,
    /// Removals in the order they happened
    pub removals: Vec<Removal>,
    pub stop: StopReason,
}

impl DecimatedPolyline {
    /// Largest error among the removed vertices, 0 when none were removed
    pub fn max_error(&self) -> f64 {
        self.removals.iter().map(|r| r.error).fold(0.0, f64::max)
    }
}

// ============================================================
// Decimator
// ============================================================

/// Decimates polylines one at a time, reusing its priority queue.
pub struct PolylineDecimator<'a, P: PointSource + ?Sized> {
    points: &'a P,
    strategy: &'a dyn DecimationStrategy,
    target_reduction: f64,
    maximum_error: f64,
    queue: PriorityQueue<usize, RemovalCost>,
}

impl<'a, P: PointSource + ?Sized> PolylineDecimator<'a, P> {
    /// `target_reduction` must lie in `[0, 1]` and `maximum_error` must be
    /// non-negative; the filter validates both before building a decimator.
    pub fn new(
        points: &'a P,
        strategy: &'a dyn DecimationStrategy,
        target_reduction: f64,
        maximum_error: f64,
    ) -> Self {
        debug_assert!((0.0..=1.0).contains(&target_reduction));
        debug_assert!(maximum_error >= 0.0);
        Self {
            points,
            strategy,
            target_reduction,
            maximum_error,
            queue: PriorityQueue::new(),
        }
    }

    /// Decimate one polyline given as global point ids.
    ///
    /// Every id must be a valid index into the point source.
    pub fn decimate(&mut self, point_ids: &[usize]) -> DecimatedPolyline {
        let mut polyline = Polyline::new(point_ids);

        if polyline.size() <= polyline.min_live() || self.target_reduction <= 0.0 {
            return DecimatedPolyline {
                point_ids: point_ids.to_vec(),
                original_len: point_ids.len(),
                is_loop: polyline.is_loop(),
                removals: Vec::new(),
                stop: StopReason::PassThrough,
            };
        }

        self.queue.clear();
        for index in 0..polyline.size() {
            self.enqueue(&polyline, index);
        }

        let mut removals = Vec::new();
        let stop = loop {
            if polyline.reduction() >= self.target_reduction {
                break StopReason::TargetReached;
            }
            if polyline.live_count() <= polyline.min_live() {
                break StopReason::MinimumSize;
            }
            let Some((index, cost)) = self.queue.pop() else {
                break StopReason::QueueExhausted;
            };
            let Some((prev, next)) = polyline.neighbors(index) else {
                continue;
            };

            let point_id = polyline.vertex(index).point_id;
            polyline.remove(index);
            trace!(point_id, error = cost.error, "removed vertex");
            removals.push(Removal {
                point_id,
                error: cost.error,
            });

            // Both former neighbors now see a different chord.
            for neighbor in [prev, next] {
                self.queue.remove(&neighbor);
                self.enqueue(&polyline, neighbor);
            }
        };
        self.queue.clear();

        debug!(
            size = polyline.size(),
            live = polyline.live_count(),
            is_loop = polyline.is_loop(),
            removed = removals.len(),
            ?stop,
            "decimated polyline"
        );

        DecimatedPolyline {
            point_ids: polyline.point_ids(),
            original_len: point_ids.len(),
            is_loop: polyline.is_loop(),
            removals,
            stop,
        }
    }

    /// Score a live removable vertex and queue it if within the maximum error.
    fn enqueue(&mut self, polyline: &Polyline, index: usize) {
        if !polyline.vertex(index).removable {
            return;
        }
        let Some(error) = self.compute_error(polyline, index) else {
            return;
        };
        // NaN never compares <=, so vertices with undefined error stay put.
        if error <= self.maximum_error {
            self.queue.push(index, RemovalCost { error, index });
        }
    }

    fn compute_error(&self, polyline: &Polyline, index: usize) -> Option<f64> {
        let (prev, next) = polyline.neighbors(index)?;
        let point = |i: usize| self.points.point(polyline.vertex(i).point_id);
        Some(
            self.strategy
                .compute_error(&point(prev), &point(index), &point(next)),
        )
    }
}

/// Decimate a single polyline with a one-off decimator.
pub fn decimate_polyline<P: PointSource + ?Sized>(
    points: &P,
    point_ids: &[usize],
    strategy: &dyn DecimationStrategy,
    target_reduction: f64,
    maximum_error: f64,
) -> DecimatedPolyline {
    PolylineDecimator::new(points, strategy, target_reduction, maximum_error).decimate(point_ids)
}
