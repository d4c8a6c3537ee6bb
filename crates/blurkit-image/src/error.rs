/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when a dimension is zero or above the supported maximum.
    #[error("Invalid image size ({0}x{1}), each dimension must be in 1..={2}")]
    InvalidImageSize(usize, usize, usize),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel index ({0}, {1}) is out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a row range is out of order or exceeds the image height.
    #[error("Row range [{0}, {1}) is out of order or out of bounds for {2} rows")]
    InvalidRowRange(usize, usize, usize),
}
