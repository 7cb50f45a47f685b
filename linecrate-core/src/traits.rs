//! Core traits for linecrate

use crate::point::*;

/// Read-only access to point coordinates by global index.
///
/// Callers validate indices against [`PointSource::point_count`] before
/// handing them to an algorithm; `point` may panic on an out-of-range index.
pub trait PointSource {
    /// Number of addressable points
    fn point_count(&self) -> usize;

    /// Coordinates of point `id`, widened to double precision
    fn point(&self, id: usize) -> Point3d;
}

impl PointSource for PointArray {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn point(&self, id: usize) -> Point3d {
        match self {
            PointArray::Single(points) => points[id].cast::<f64>(),
            PointArray::Double(points) => points[id],
        }
    }
}

impl PointSource for [Point3d] {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn point(&self, id: usize) -> Point3d {
        self[id]
    }
}

impl PointSource for [Point3f] {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn point(&self, id: usize) -> Point3d {
        self[id].cast::<f64>()
    }
}

impl<T> PointSource for Vec<T>
where
    [T]: PointSource,
{
    fn point_count(&self) -> usize {
        self.as_slice().point_count()
    }

    fn point(&self, id: usize) -> Point3d {
        self.as_slice().point(id)
    }
}

impl<S: PointSource + ?Sized> PointSource for &S {
    fn point_count(&self) -> usize {
        (**self).point_count()
    }

    fn point(&self, id: usize) -> Point3d {
        (**self).point(id)
    }
}
