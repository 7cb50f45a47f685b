//! Polyline simplification and decimation algorithms
//!
//! This crate reduces the number of vertices in sets of polylines while
//! bounding the error introduced by each removal:
//! - Pluggable error metrics (chord distance, turning angle)
//! - Greedy priority-queue decimation over a linked vertex list
//! - Output compaction that shares points between polylines

pub mod strategy;
pub mod polyline;
pub mod decimate;
pub mod compaction;
pub mod filter;

pub use strategy::*;
pub use polyline::*;
pub use decimate::*;
pub use compaction::*;
pub use filter::*;

use linecrate_core::{PolylineSet, Result};

/// Simplify a set of polylines by reducing their vertex count
pub trait PolylineSimplifier {
    /// Simplify with target reduction ratio (0.0 = no reduction, 1.0 = maximum reduction)
    fn simplify(&self, lines: &PolylineSet, target_reduction: f64) -> Result<PolylineSet>;
}
