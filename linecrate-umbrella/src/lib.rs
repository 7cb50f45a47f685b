//! # linecrate
//!
//! Polyline decimation and line-set processing for Rust.
//!
//! This is the umbrella crate that provides convenient access to all linecrate functionality.
//! You can use this crate to get everything in one place, or use individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Points, attribute arrays, polyline sets
//! - **Simplification**: Error-bounded polyline decimation
//!
//! ## Quick Start
//!
//! ```rust
//! use linecrate::prelude::*;
//!
//! let points = vec![
//!     Point3d::new(0.0, 0.0, 0.0),
//!     Point3d::new(1.0, 0.0, 0.0),
//!     Point3d::new(2.0, 0.0, 0.0),
//! ];
//! let lines = PolylineSet::from_points_and_lines(points, vec![vec![0, 1, 2]]);
//!
//! let result = DecimatePolylineFilter::new()
//!     .with_target_reduction(1.0)
//!     .execute(&lines)
//!     .unwrap();
//! assert_eq!(result.output.lines, vec![vec![0, 1]]);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables core and simplification
//! - `simplification`: Polyline decimation
//! - `all`: Enables all features

// Re-export core functionality
pub use linecrate_core::*;

// Re-export sub-crates
#[cfg(feature = "simplification")]
pub use linecrate_simplification as simplification;

/// Convenient imports for common use cases
pub mod prelude {
    pub use linecrate_core::*;

    #[cfg(feature = "simplification")]
    pub use linecrate_simplification::*;
}
