//! linecrate info command - summarize a polyline set.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::{load_set, print_json};
use crate::Cli;

#[derive(Serialize)]
struct InfoResult {
    input: String,
    points: usize,
    lines: usize,
    loops: usize,
    line_vertices: usize,
    precision: String,
    point_arrays: Vec<String>,
    line_arrays: Vec<String>,
    bounds: Option<([f64; 3], [f64; 3])>,
}

pub fn run(input: &Path, cli: &Cli) -> Result<()> {
    let set = load_set(input)?;

    let result = InfoResult {
        input: input.display().to_string(),
        points: set.point_count(),
        lines: set.line_count(),
        loops: set
            .lines
            .iter()
            .filter(|l| l.len() >= 2 && l.first() == l.last())
            .count(),
        line_vertices: set.line_vertex_count(),
        precision: format!("{:?}", set.points.precision()).to_lowercase(),
        point_arrays: set.point_data.arrays().iter().map(|a| a.name.clone()).collect(),
        line_arrays: set.line_data.arrays().iter().map(|a| a.name.clone()).collect(),
        bounds: set
            .bounds()
            .map(|(min, max)| ([min.x, min.y, min.z], [max.x, max.y, max.z])),
    };

    if print_json(&result, cli.format, cli.quiet)? || cli.quiet {
        return Ok(());
    }

    println!("{}", result.input);
    println!("  Points: {} ({})", result.points, result.precision);
    println!("  Lines: {} ({} closed)", result.lines, result.loops);
    println!("  Line vertices: {}", result.line_vertices);
    if let Some((min, max)) = result.bounds {
        println!("  Bounds: {:?} .. {:?}", min, max);
    }
    if !result.point_arrays.is_empty() {
        println!("  Point arrays: {}", result.point_arrays.join(", "));
    }
    if !result.line_arrays.is_empty() {
        println!("  Line arrays: {}", result.line_arrays.join(", "));
    }

    Ok(())
}
