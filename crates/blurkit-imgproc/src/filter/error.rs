use blurkit_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the filter module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The blur radius exceeds the largest supported kernel.
    #[error("Invalid radius {0}, the maximum supported radius is {1}")]
    InvalidRadius(usize, usize),

    /// The work could not be scheduled on the requested workers.
    #[error(transparent)]
    Parallel(#[from] ParallelError),

    /// The image buffers could not be created or split.
    #[error(transparent)]
    Image(#[from] ImageError),
}
