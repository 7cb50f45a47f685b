//! Polyline set data structures and functionality

use crate::attributes::AttributeData;
use crate::point::*;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A collection of polylines indexing into one shared point array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolylineSet {
    pub points: PointArray,
    pub lines: Vec<Vec<usize>>,
    #[serde(default)]
    pub point_data: AttributeData,
    #[serde(default)]
    pub line_data: AttributeData,
}

impl PolylineSet {
    /// Create a new empty set with double precision points
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from points and lines
    pub fn from_points_and_lines(points: impl Into<PointArray>, lines: Vec<Vec<usize>>) -> Self {
        Self {
            points: points.into(),
            lines,
            point_data: AttributeData::new(),
            line_data: AttributeData::new(),
        }
    }

    /// Parse a set from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let set: PolylineSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get the number of points
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Get the number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of line vertices, counting shared points once per line
    pub fn line_vertex_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || self.lines.is_empty()
    }

    /// Add a point, returning its index
    pub fn add_point(&mut self, point: Point3d) -> usize {
        self.points.push(point)
    }

    /// Add a line, returning its index
    pub fn add_line(&mut self, line: Vec<usize>) -> usize {
        self.lines.push(line);
        self.lines.len() - 1
    }

    /// Check that every line index is in range and attribute tuple counts match
    pub fn validate(&self) -> Result<()> {
        let len = self.point_count();
        for line in &self.lines {
            if let Some(&index) = line.iter().find(|&&id| id >= len) {
                return Err(Error::IndexOutOfRange { index, len });
            }
        }
        self.point_data.validate(len)?;
        self.line_data.validate(self.line_count())
    }

    /// Axis-aligned bounds of all points, `None` when there are none
    pub fn bounds(&self) -> Option<(Point3d, Point3d)> {
        let mut points = self.points.iter();
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| {
            (min.inf(&p), max.sup(&p))
        }))
    }
}
