//! Polyline decimation filter
//!
//! Configuration plus execution over a whole [`PolylineSet`]: validates the
//! input, decimates every line, compacts the surviving points and carries
//! point and line attributes across.

use crate::compaction::{OutputBuilder, PointRemap};
use crate::decimate::{DecimatedPolyline, PolylineDecimator};
use crate::strategy::{DecimationStrategy, StrategyKind};
use crate::PolylineSimplifier;
use linecrate_core::{Error, OutputPrecision, PolylineSet, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Lines each rayon thread decimates between abort checks in parallel mode
const PARALLEL_LINES_PER_THREAD: usize = 16;

// ============================================================
// Configuration
// ============================================================

/// Decimation filter for sets of polylines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimatePolylineFilter {
    /// Fraction of each polyline's vertices to try to remove, in `[0, 1]`
    pub target_reduction: f64,
    /// Largest error allowed for a single removal; `None` means unbounded
    pub maximum_error: Option<f64>,
    /// Storage precision of the output points
    pub output_precision: OutputPrecision,
    /// Built-in error metric
    pub strategy: StrategyKind,
    /// Decimate polylines on the rayon thread pool
    pub parallel: bool,
    #[serde(skip)]
    custom_strategy: Option<Arc<dyn DecimationStrategy>>,
}

impl Default for DecimatePolylineFilter {
    fn default() -> Self {
        Self {
            target_reduction: 0.9,
            maximum_error: None,
            output_precision: OutputPrecision::Default,
            strategy: StrategyKind::Distance,
            parallel: false,
            custom_strategy: None,
        }
    }
}

impl DecimatePolylineFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target reduction, clamped to `[0, 1]`
    pub fn with_target_reduction(mut self, target_reduction: f64) -> Self {
        self.target_reduction = target_reduction.clamp(0.0, 1.0);
        self
    }

    /// Bound the error of each removal, clamped to be non-negative
    pub fn with_maximum_error(mut self, maximum_error: f64) -> Self {
        self.maximum_error = Some(maximum_error.clamp(0.0, f64::INFINITY));
        self
    }

    pub fn with_unbounded_error(mut self) -> Self {
        self.maximum_error = None;
        self
    }

    pub fn with_output_precision(mut self, output_precision: OutputPrecision) -> Self {
        self.output_precision = output_precision;
        self
    }

    /// Use a built-in strategy, dropping any custom one
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self.custom_strategy = None;
        self
    }

    /// Use a caller-supplied error metric
    pub fn with_strategy_impl(mut self, strategy: Arc<dyn DecimationStrategy>) -> Self {
        self.custom_strategy = Some(strategy);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Maximum error as a number; unbounded is `f64::INFINITY`
    pub fn maximum_error(&self) -> f64 {
        self.maximum_error.unwrap_or(f64::INFINITY)
    }

    /// The error metric in effect
    pub fn strategy_impl(&self) -> Arc<dyn DecimationStrategy> {
        match &self.custom_strategy {
            Some(strategy) => Arc::clone(strategy),
            None => self.strategy.build(),
        }
    }

    /// Load a configuration from JSON; omitted fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let filter: DecimatePolylineFilter = serde_json::from_str(json)?;
        filter.validate_parameters()?;
        Ok(filter)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject parameters the decimator has no defined behavior for
    pub fn validate_parameters(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.target_reduction) {
            return Err(Error::InvalidParameter(format!(
                "Target reduction must be between 0.0 and 1.0, got {}",
                self.target_reduction
            )));
        }
        if let Some(maximum_error) = self.maximum_error {
            if maximum_error.is_nan() || maximum_error < 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "Maximum error must be non-negative, got {}",
                    maximum_error
                )));
            }
        }
        Ok(())
    }
}

// ============================================================
// Results
// ============================================================

/// Summary counts for one execution
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecimationStats {
    pub input_points: usize,
    pub output_points: usize,
    pub input_lines: usize,
    pub output_lines: usize,
    pub removed_vertices: usize,
    /// Largest error of any removed vertex
    pub max_removed_error: f64,
}

impl DecimationStats {
    fn record(&mut self, decimated: &DecimatedPolyline) {
        self.removed_vertices += decimated.removals.len();
        self.max_removed_error = self.max_removed_error.max(decimated.max_error());
    }
}

/// Result of running the filter
#[derive(Debug, Clone)]
pub struct DecimationOutput {
    /// Decimated polylines over compacted points
    pub output: PolylineSet,
    /// Input point id to output point id
    pub point_map: PointRemap,
    /// Per-line results in input point ids, one per emitted line
    pub reports: Vec<DecimatedPolyline>,
    pub stats: DecimationStats,
    /// Set when the abort callback stopped execution before the last line
    pub aborted: bool,
}

// ============================================================
// Execution
// ============================================================

impl DecimatePolylineFilter {
    /// Decimate every polyline in `input`
    pub fn execute(&self, input: &PolylineSet) -> Result<DecimationOutput> {
        self.execute_with_abort(input, |_| false)
    }

    /// Decimate `input`, calling `abort` with the fraction of lines done after
    /// each line. Returning `true` stops execution; lines already emitted are
    /// kept and the output stays consistent.
    ///
    /// In parallel mode lines are decimated in chunks of a few lines per
    /// thread, so an abort skips every chunk not yet started.
    pub fn execute_with_abort<F>(&self, input: &PolylineSet, mut abort: F) -> Result<DecimationOutput>
    where
        F: FnMut(f64) -> bool,
    {
        self.validate_parameters()?;
        input.validate()?;

        let strategy = self.strategy_impl();
        let strategy: &dyn DecimationStrategy = strategy.as_ref();
        let maximum_error = self.maximum_error();
        let precision = self.output_precision.resolve(input.points.precision());
        let total = input.line_count();

        debug!(
            lines = total,
            points = input.point_count(),
            target_reduction = self.target_reduction,
            maximum_error,
            strategy = strategy.name(),
            parallel = self.parallel,
            "decimating polylines"
        );

        let mut builder = OutputBuilder::new(input, precision);
        let mut reports = Vec::with_capacity(total);
        let mut stats = DecimationStats {
            input_points: input.point_count(),
            input_lines: total,
            ..Default::default()
        };
        let mut aborted = false;

        let mut emit = |index: usize, decimated: DecimatedPolyline| -> Result<bool> {
            builder.emit_polyline(index, &decimated)?;
            stats.record(&decimated);
            reports.push(decimated);
            let done = index + 1;
            Ok(abort(done as f64 / total as f64) && done < total)
        };

        if self.parallel {
            // Lines are independent until compaction, which stays sequential
            // so the point remap needs no locking.
            let chunk_len = rayon::current_num_threads().max(1) * PARALLEL_LINES_PER_THREAD;
            'chunks: for (chunk_index, chunk) in input.lines.chunks(chunk_len).enumerate() {
                let decimated: Vec<DecimatedPolyline> = chunk
                    .par_iter()
                    .map_init(
                        || {
                            PolylineDecimator::new(
                                &input.points,
                                strategy,
                                self.target_reduction,
                                maximum_error,
                            )
                        },
                        |decimator, line| decimator.decimate(line),
                    )
                    .collect();
                let first = chunk_index * chunk_len;
                for (offset, line) in decimated.into_iter().enumerate() {
                    if emit(first + offset, line)? {
                        aborted = true;
                        break 'chunks;
                    }
                }
            }
        } else {
            let mut decimator =
                PolylineDecimator::new(&input.points, strategy, self.target_reduction, maximum_error);
            for (index, line) in input.lines.iter().enumerate() {
                if emit(index, decimator.decimate(line))? {
                    aborted = true;
                    break;
                }
            }
        }

        let (output, point_map) = builder.finish();
        stats.output_points = output.point_count();
        stats.output_lines = output.line_count();

        info!(
            lines_in = stats.input_lines,
            lines_out = stats.output_lines,
            points_in = stats.input_points,
            points_out = stats.output_points,
            removed = stats.removed_vertices,
            aborted,
            "polyline decimation finished"
        );

        Ok(DecimationOutput {
            output,
            point_map,
            reports,
            stats,
            aborted,
        })
    }
}

impl PolylineSimplifier for DecimatePolylineFilter {
    fn simplify(&self, lines: &PolylineSet, target_reduction: f64) -> Result<PolylineSet> {
        if !(0.0..=1.0).contains(&target_reduction) {
            return Err(Error::InvalidParameter(
                "Reduction ratio must be between 0.0 and 1.0".to_string(),
            ));
        }
        let filter = DecimatePolylineFilter {
            target_reduction,
            ..self.clone()
        };
        Ok(filter.execute(lines)?.output)
    }
}
