use blurkit_image::PixelBuffer;

use super::{FilterError, SeparableBlur};
use crate::parallel::ExecutionStrategy;

/// Blur an image using a gaussian blur filter split over a fixed number of workers.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `radius` - The largest pixel offset included in the blur window.
/// * `num_workers` - The number of worker threads; `1` runs on the calling thread.
///
/// # Returns
///
/// A new blurred image with the same size as `src`. The result does not depend
/// on `num_workers`.
///
/// # Errors
///
/// Fails if `radius` is above [`super::kernels::MAX_RADIUS`], if `num_workers`
/// is zero, or if the worker threads cannot be spawned.
///
/// # Example
///
/// ```
/// use blurkit_image::{Channel, ImageSize, PixelBuffer};
/// use blurkit_imgproc::filter::gaussian_blur;
///
/// let mut image = PixelBuffer::from_size_val(ImageSize { width: 4, height: 4 }, 0).unwrap();
/// image.set(Channel::Red, 2, 2, 255).unwrap();
///
/// let blurred = gaussian_blur(&image, 1, 2).unwrap();
///
/// assert!(blurred.get(Channel::Red, 2, 2).unwrap() < 255);
/// assert_eq!(blurred.get(Channel::Red, 0, 0).unwrap(), 0);
/// ```
pub fn gaussian_blur(
    src: &PixelBuffer,
    radius: usize,
    num_workers: usize,
) -> Result<PixelBuffer, FilterError> {
    gaussian_blur_with_strategy(src, radius, ExecutionStrategy::Fixed(num_workers))
}

/// Blur an image using a gaussian blur filter with execution strategy control.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `radius` - The largest pixel offset included in the blur window.
/// * `strategy` - Execution strategy: `Serial`, `Fixed(n)` or `Auto`.
pub fn gaussian_blur_with_strategy(
    src: &PixelBuffer,
    radius: usize,
    strategy: ExecutionStrategy,
) -> Result<PixelBuffer, FilterError> {
    SeparableBlur::new(radius)?.apply(src, strategy)
}

/// Blur an image repeatedly, feeding each result into the next blur.
///
/// The kernel is computed once for all iterations. Zero iterations return a
/// copy of `src`.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `radius` - The largest pixel offset included in the blur window.
/// * `num_workers` - The number of worker threads.
/// * `iterations` - How many times the blur is applied.
pub fn gaussian_blur_iterations(
    src: &PixelBuffer,
    radius: usize,
    num_workers: usize,
    iterations: usize,
) -> Result<PixelBuffer, FilterError> {
    let blur = SeparableBlur::new(radius)?;
    let strategy = ExecutionStrategy::Fixed(num_workers);

    // early check, zero iterations still reject zero workers
    strategy.num_workers()?;

    let mut dst = src.clone();
    for i in 0..iterations {
        log::debug!("blur iteration {}/{}", i + 1, iterations);
        dst = blur.apply(&dst, strategy)?;
    }

    Ok(dst)
}
