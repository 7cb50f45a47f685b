//! Core data structures and traits for linecrate
//!
//! This crate provides fundamental types for polyline processing:
//! points and point storage, attribute arrays, polyline sets and the
//! point-source trait consumed by the algorithms.

pub mod point;
pub mod attributes;
pub mod polyline_set;
pub mod traits;
pub mod error;

pub use point::*;
pub use attributes::*;
pub use polyline_set::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
