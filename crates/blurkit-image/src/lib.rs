#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// planar three channel image representation.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{
    Channel, ImageSize, PixelBuffer, RowRange, RowStripeMut, MAX_DIMENSION, NUM_CHANNELS,
};
