//! linecrate decimate command - reduce the vertex count of every polyline.

use std::path::Path;

use anyhow::{Context, Result};
use linecrate_core::OutputPrecision;
use linecrate_simplification::{DecimatePolylineFilter, StrategyKind};
use serde::Serialize;
use tracing::info;

use super::{load_set, print_json};
use crate::{Cli, PrecisionArg, StrategyArg};

/// Flags of the decimate subcommand
pub struct Options<'a> {
    pub config: Option<&'a Path>,
    pub reduction: Option<f64>,
    pub max_error: Option<f64>,
    pub precision: Option<PrecisionArg>,
    pub strategy: Option<StrategyArg>,
    pub parallel: bool,
}

#[derive(Serialize)]
struct DecimateResult {
    input: String,
    output: String,
    target_reduction: f64,
    maximum_error: Option<f64>,
    original_points: usize,
    final_points: usize,
    original_line_vertices: usize,
    final_line_vertices: usize,
    removed_vertices: usize,
    max_removed_error: f64,
}

fn build_filter(options: &Options) -> Result<DecimatePolylineFilter> {
    let mut filter = match options.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {:?}", path))?;
            DecimatePolylineFilter::from_json_str(&json)
                .with_context(|| format!("Invalid filter config {:?}", path))?
        }
        None => DecimatePolylineFilter::new(),
    };

    if let Some(reduction) = options.reduction {
        filter = filter.with_target_reduction(reduction);
    }
    if let Some(max_error) = options.max_error {
        filter = filter.with_maximum_error(max_error);
    }
    if let Some(precision) = options.precision {
        filter = filter.with_output_precision(match precision {
            PrecisionArg::Default => OutputPrecision::Default,
            PrecisionArg::Single => OutputPrecision::Single,
            PrecisionArg::Double => OutputPrecision::Double,
        });
    }
    if let Some(strategy) = options.strategy {
        filter = filter.with_strategy(match strategy {
            StrategyArg::Distance => StrategyKind::Distance,
            StrategyArg::Angle => StrategyKind::Angle,
        });
    }
    if options.parallel {
        filter = filter.with_parallel(true);
    }
    Ok(filter)
}

pub fn run(input: &Path, output_path: &Path, options: &Options, cli: &Cli) -> Result<()> {
    let set = load_set(input)?;
    let filter = build_filter(options)?;

    info!(
        input = %input.display(),
        lines = set.line_count(),
        points = set.point_count(),
        "decimating"
    );

    let decimated = filter
        .execute(&set)
        .with_context(|| format!("Failed to decimate {:?}", input))?;

    let json = decimated.output.to_json_string()?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write {:?}", output_path))?;

    let result = DecimateResult {
        input: input.display().to_string(),
        output: output_path.display().to_string(),
        target_reduction: filter.target_reduction,
        maximum_error: filter.maximum_error,
        original_points: decimated.stats.input_points,
        final_points: decimated.stats.output_points,
        original_line_vertices: set.line_vertex_count(),
        final_line_vertices: decimated.output.line_vertex_count(),
        removed_vertices: decimated.stats.removed_vertices,
        max_removed_error: decimated.stats.max_removed_error,
    };

    if print_json(&result, cli.format, cli.quiet)? || cli.quiet {
        return Ok(());
    }

    println!(
        "Decimated {} -> {}",
        result.input, result.output
    );
    println!(
        "  Points: {} -> {}",
        result.original_points, result.final_points
    );
    println!(
        "  Line vertices: {} -> {} ({} removed)",
        result.original_line_vertices, result.final_line_vertices, result.removed_vertices
    );
    println!("  Largest removal error: {:.6}", result.max_removed_error);

    Ok(())
}
