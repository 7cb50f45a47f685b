//! Per-point and per-line attribute arrays

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A named array of fixed-width tuples (scalars, normals, colors, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAttributeArray")]
pub struct AttributeArray {
    pub name: String,
    pub components: usize,
    pub values: Vec<f64>,
}

/// Serialized layout, checked by `from_values` on the way in
#[derive(Deserialize)]
struct RawAttributeArray {
    name: String,
    components: usize,
    values: Vec<f64>,
}

impl TryFrom<RawAttributeArray> for AttributeArray {
    type Error = Error;

    fn try_from(raw: RawAttributeArray) -> Result<Self> {
        Self::from_values(raw.name, raw.components, raw.values)
    }
}

impl AttributeArray {
    /// Create an empty array
    pub fn new(name: impl Into<String>, components: usize) -> Self {
        Self {
            name: name.into(),
            components: components.max(1),
            values: Vec::new(),
        }
    }

    /// Create an array from flat values; `values.len()` must be a multiple of `components`
    pub fn from_values(name: impl Into<String>, components: usize, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if components == 0 {
            return Err(Error::InvalidData(format!(
                "Attribute array '{}' must have at least one component",
                name
            )));
        }
        if values.len() % components != 0 {
            return Err(Error::InvalidData(format!(
                "Attribute array '{}' has {} values, not a multiple of {} components",
                name,
                values.len(),
                components
            )));
        }
        Ok(Self {
            name,
            components,
            values,
        })
    }

    /// Get the number of complete tuples; 0 for a zero-width array
    pub fn tuple_count(&self) -> usize {
        self.values.len().checked_div(self.components).unwrap_or(0)
    }

    /// Borrow tuple `index`
    pub fn tuple(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.components)?;
        self.values.get(start..start + self.components)
    }

    /// Append a tuple; its width must match `components`
    pub fn push_tuple(&mut self, tuple: &[f64]) -> Result<()> {
        if tuple.len() != self.components {
            return Err(Error::InvalidData(format!(
                "Tuple of width {} pushed onto '{}' with {} components",
                tuple.len(),
                self.name,
                self.components
            )));
        }
        self.values.extend_from_slice(tuple);
        Ok(())
    }

    /// Same name and width, no tuples
    pub fn empty_like(&self) -> Self {
        Self::new(self.name.clone(), self.components)
    }
}

/// An ordered collection of attribute arrays sharing one tuple count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeData {
    arrays: Vec<AttributeArray>,
}

impl AttributeData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an array, replacing any existing array of the same name
    pub fn add_array(&mut self, array: AttributeArray) {
        match self.arrays.iter_mut().find(|a| a.name == array.name) {
            Some(existing) => *existing = array,
            None => self.arrays.push(array),
        }
    }

    pub fn array(&self, name: &str) -> Option<&AttributeArray> {
        self.arrays.iter().find(|a| a.name == name)
    }

    pub fn arrays(&self) -> &[AttributeArray] {
        &self.arrays
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Check that every array carries exactly `expected` full tuples
    pub fn validate(&self, expected: usize) -> Result<()> {
        for array in &self.arrays {
            if array.components == 0 {
                return Err(Error::InvalidData(format!(
                    "Attribute array '{}' must have at least one component",
                    array.name
                )));
            }
            if Some(array.values.len()) != array.components.checked_mul(expected) {
                return Err(Error::InvalidData(format!(
                    "Attribute array '{}' has {} values, expected {} tuples of {} components",
                    array.name,
                    array.values.len(),
                    expected,
                    array.components
                )));
            }
        }
        Ok(())
    }

    /// Arrays with the same layout as `self` but no tuples
    pub fn copy_allocate(&self) -> Self {
        Self {
            arrays: self.arrays.iter().map(AttributeArray::empty_like).collect(),
        }
    }

    /// Append tuple `from` of every array in `source` onto the matching array here.
    ///
    /// `self` must have been produced by `source.copy_allocate()`.
    pub fn copy_tuple(&mut self, source: &AttributeData, from: usize) -> Result<()> {
        for (dst, src) in self.arrays.iter_mut().zip(&source.arrays) {
            let tuple = src.tuple(from).ok_or(Error::IndexOutOfRange {
                index: from,
                len: src.tuple_count(),
            })?;
            dst.push_tuple(tuple)?;
        }
        Ok(())
    }
}
