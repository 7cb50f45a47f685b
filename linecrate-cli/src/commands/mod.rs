//! Subcommand implementations and shared output helpers.

pub mod decimate;
pub mod info;

use std::path::Path;

use anyhow::{Context, Result};
use linecrate_core::PolylineSet;
use serde::Serialize;

use crate::OutputFormat;

/// Load and validate a polyline set from a JSON file
pub fn load_set(path: &Path) -> Result<PolylineSet> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    PolylineSet::from_json_str(&json)
        .with_context(|| format!("Failed to parse polyline set from {:?}", path))
}

/// Print a result as pretty JSON when JSON output was requested
pub fn print_json<T: Serialize>(value: &T, format: OutputFormat, quiet: bool) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            if !quiet {
                println!("{}", serde_json::to_string_pretty(value)?);
            }
            Ok(true)
        }
        OutputFormat::Text => Ok(false),
    }
}
