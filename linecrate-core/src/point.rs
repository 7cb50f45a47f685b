//! Point types and point storage

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Numeric type used to store point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Single,
    Double,
}

/// Requested precision for coordinates written by a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputPrecision {
    /// Keep whatever precision the input points use
    #[default]
    Default,
    Single,
    Double,
}

impl OutputPrecision {
    /// Resolve the concrete storage precision for a given input precision
    pub fn resolve(self, input: Precision) -> Precision {
        match self {
            OutputPrecision::Default => input,
            OutputPrecision::Single => Precision::Single,
            OutputPrecision::Double => Precision::Double,
        }
    }
}

/// Point coordinates stored in either single or double precision.
///
/// Reads always widen to [`Point3d`]; writes narrow to the array's own
/// storage type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "precision", content = "coords", rename_all = "lowercase")]
pub enum PointArray {
    Single(Vec<Point3f>),
    Double(Vec<Point3d>),
}

impl PointArray {
    /// Create an empty array with the given precision
    pub fn new(precision: Precision) -> Self {
        Self::with_capacity(precision, 0)
    }

    /// Create an empty array with room for `capacity` points
    pub fn with_capacity(precision: Precision, capacity: usize) -> Self {
        match precision {
            Precision::Single => PointArray::Single(Vec::with_capacity(capacity)),
            Precision::Double => PointArray::Double(Vec::with_capacity(capacity)),
        }
    }

    pub fn precision(&self) -> Precision {
        match self {
            PointArray::Single(_) => Precision::Single,
            PointArray::Double(_) => Precision::Double,
        }
    }

    /// Get the number of points
    pub fn len(&self) -> usize {
        match self {
            PointArray::Single(points) => points.len(),
            PointArray::Double(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a point widened to double precision
    pub fn get(&self, index: usize) -> Option<Point3d> {
        match self {
            PointArray::Single(points) => points.get(index).map(|p| p.cast::<f64>()),
            PointArray::Double(points) => points.get(index).copied(),
        }
    }

    /// Append a point, returning its index
    pub fn push(&mut self, point: Point3d) -> usize {
        match self {
            PointArray::Single(points) => {
                points.push(point.cast::<f32>());
                points.len() - 1
            }
            PointArray::Double(points) => {
                points.push(point);
                points.len() - 1
            }
        }
    }

    /// Iterate over all points widened to double precision
    pub fn iter(&self) -> impl Iterator<Item = Point3d> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl Default for PointArray {
    fn default() -> Self {
        PointArray::new(Precision::Double)
    }
}

impl From<Vec<Point3d>> for PointArray {
    fn from(points: Vec<Point3d>) -> Self {
        PointArray::Double(points)
    }
}

impl From<Vec<Point3f>> for PointArray {
    fn from(points: Vec<Point3f>) -> Self {
        PointArray::Single(points)
    }
}
