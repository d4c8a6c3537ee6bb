//! Filter operations
//!
//! This module provides the separable gaussian blur and its building blocks.

/// Error types for the filter module.
mod error;
pub use error::FilterError;

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
