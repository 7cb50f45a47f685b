//! Output compaction
//!
//! Surviving polylines are written into a fresh [`PolylineSet`] whose point
//! array holds only referenced points, each exactly once. The first time a
//! global point id is emitted it is assigned the next compacted index and its
//! coordinates and point attributes are copied; later references reuse it.

use crate::decimate::DecimatedPolyline;
use linecrate_core::{
    Error, PointArray, PointSource, PolylineSet, Precision, Result,
};
use serde::{Deserialize, Serialize};

/// Map from input point ids to compacted output point ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRemap {
    map: Vec<Option<usize>>,
    emitted: usize,
}

impl PointRemap {
    /// Remap table for `input_points` points, none emitted yet
    pub fn new(input_points: usize) -> Self {
        Self {
            map: vec![None; input_points],
            emitted: 0,
        }
    }

    /// Compacted id of an input point, if it was emitted
    pub fn get(&self, input_id: usize) -> Option<usize> {
        self.map.get(input_id).copied().flatten()
    }

    /// Number of distinct points emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// `(input id, output id)` pairs in input order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.map
            .iter()
            .enumerate()
            .filter_map(|(input, output)| output.map(|o| (input, o)))
    }

    /// Look up `input_id`, assigning the next compacted id on first sight.
    /// Returns the id and whether it was newly assigned.
    fn assign(&mut self, input_id: usize) -> Result<(usize, bool)> {
        let len = self.map.len();
        let slot = self
            .map
            .get_mut(input_id)
            .ok_or(Error::IndexOutOfRange { index: input_id, len })?;
        match *slot {
            Some(output) => Ok((output, false)),
            None => {
                let output = self.emitted;
                *slot = Some(output);
                self.emitted += 1;
                Ok((output, true))
            }
        }
    }
}

/// Accumulates decimated polylines into a compacted output set
#[derive(Debug)]
pub struct OutputBuilder<'a> {
    input: &'a PolylineSet,
    output: PolylineSet,
    remap: PointRemap,
}

impl<'a> OutputBuilder<'a> {
    /// Start an empty output for `input`, storing points at `precision`
    pub fn new(input: &'a PolylineSet, precision: Precision) -> Self {
        let output = PolylineSet {
            points: PointArray::with_capacity(precision, input.point_count()),
            lines: Vec::with_capacity(input.line_count()),
            point_data: input.point_data.copy_allocate(),
            line_data: input.line_data.copy_allocate(),
        };
        Self {
            input,
            output,
            remap: PointRemap::new(input.point_count()),
        }
    }

    /// Append one decimated polyline that came from input line `line_index`.
    pub fn emit_polyline(&mut self, line_index: usize, decimated: &DecimatedPolyline) -> Result<()> {
        let mut line = Vec::with_capacity(decimated.point_ids.len());
        for &input_id in &decimated.point_ids {
            let (output_id, is_new) = self.remap.assign(input_id)?;
            if is_new {
                self.output.points.push(self.input.points.point(input_id));
                self.output
                    .point_data
                    .copy_tuple(&self.input.point_data, input_id)?;
            }
            line.push(output_id);
        }
        self.output.lines.push(line);
        self.output
            .line_data
            .copy_tuple(&self.input.line_data, line_index)
    }

    pub fn finish(self) -> (PolylineSet, PointRemap) {
        (self.output, self.remap)
    }
}
