use blurkit_image::{Channel, PixelBuffer, RowStripeMut};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use super::{kernels, FilterError};
use crate::parallel::{self, ExecutionStrategy};

/// Weighted average of the samples around `center` along one axis.
///
/// Offsets that fall outside `[0, len)` are left out of both the sum and the
/// normalization, so the result never darkens towards the borders.
///
/// PRECONDITION: `weights` is not empty and `center < len`.
#[inline]
fn clipped_weighted_average(
    weights: &[f64],
    center: usize,
    len: usize,
    sample: impl Fn(usize) -> u8,
) -> u8 {
    let mut acc = weights[0] * f64::from(sample(center));
    let mut norm = weights[0];

    for (offset, &w) in weights.iter().enumerate().skip(1) {
        let next = center + offset;
        if offset > center && next >= len {
            break;
        }
        if let Some(prev) = center.checked_sub(offset) {
            acc += w * f64::from(sample(prev));
            norm += w;
        }
        if next < len {
            acc += w * f64::from(sample(next));
            norm += w;
        }
    }

    (acc / norm).round().clamp(0.0, 255.0) as u8
}

/// Blur the rows of `dst` along the x axis, reading the same rows of `src`.
///
/// PRECONDITION: `dst` is a stripe of a buffer with the same size as `src`.
pub(crate) fn horizontal_pass(src: &PixelBuffer, mut dst: RowStripeMut<'_>, weights: &[f64]) {
    let width = src.width();
    for ch in Channel::ALL {
        for (y, dst_row) in dst.rows_mut(ch) {
            let src_row = src.row(ch, y);
            for (x, out) in dst_row.iter_mut().enumerate() {
                *out = clipped_weighted_average(weights, x, width, |xi| src_row[xi]);
            }
        }
    }
}

/// Blur the rows of `dst` along the y axis.
///
/// Every output row reads up to `weights.len() - 1` rows above and below it,
/// so `src` must be completely written before this runs.
///
/// PRECONDITION: `dst` is a stripe of a buffer with the same size as `src`.
pub(crate) fn vertical_pass(src: &PixelBuffer, mut dst: RowStripeMut<'_>, weights: &[f64]) {
    let width = src.width();
    let height = src.height();
    for ch in Channel::ALL {
        let plane = src.channel(ch);
        for (y, dst_row) in dst.rows_mut(ch) {
            for (x, out) in dst_row.iter_mut().enumerate() {
                *out = clipped_weighted_average(weights, y, height, |yi| plane[yi * width + x]);
            }
        }
    }
}

/// A separable gaussian blur that applies the same 1D kernel along rows and then columns.
///
/// The kernel weights are computed once at construction and shared read only by
/// every worker of both passes.
#[derive(Debug, Clone)]
pub struct SeparableBlur {
    weights: Vec<f64>,
}

impl SeparableBlur {
    /// Create a new blur for the given radius.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidRadius`] if the radius exceeds [`kernels::MAX_RADIUS`].
    pub fn new(radius: usize) -> Result<Self, FilterError> {
        let weights = kernels::gaussian_weights(radius)?;
        Ok(Self { weights })
    }

    /// The radius of the kernel.
    pub fn radius(&self) -> usize {
        self.weights.len() - 1
    }

    /// The one sided kernel weights, indexed by offset from the center.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Blur an image.
    ///
    /// Rows are partitioned over the workers of `strategy`. All workers of the
    /// horizontal pass are joined before any worker of the vertical pass starts.
    ///
    /// # Arguments
    ///
    /// * `src` - The source image, left untouched.
    /// * `strategy` - The execution strategy.
    ///
    /// # Returns
    ///
    /// A new blurred image with the size of `src`.
    ///
    /// # Errors
    ///
    /// Fails if the worker count is invalid or the worker threads cannot be
    /// spawned. No partial result is produced in that case.
    pub fn apply(
        &self,
        src: &PixelBuffer,
        strategy: ExecutionStrategy,
    ) -> Result<PixelBuffer, FilterError> {
        self.apply_with(src, strategy, |builder| builder.build())
    }

    /// Blur an image, building the worker pool with `build_pool`.
    pub(crate) fn apply_with<B>(
        &self,
        src: &PixelBuffer,
        strategy: ExecutionStrategy,
        build_pool: B,
    ) -> Result<PixelBuffer, FilterError>
    where
        B: FnOnce(ThreadPoolBuilder) -> Result<ThreadPool, ThreadPoolBuildError>,
    {
        let num_workers = strategy.num_workers()?;
        let ranges = parallel::partition_rows(src.height(), num_workers)?;
        let pool = parallel::build_worker_pool(num_workers, build_pool)?;

        log::debug!(
            "blurring {} with radius {} over {} workers",
            src.size(),
            self.radius(),
            num_workers
        );

        let mut scratch = PixelBuffer::from_size_val(src.size(), 0)?;
        let mut dst = src.clone();

        parallel::for_each_stripe(pool.as_ref(), scratch.split_rows_mut(&ranges)?, |stripe| {
            horizontal_pass(src, stripe, &self.weights)
        });
        log::debug!("horizontal pass joined");

        parallel::for_each_stripe(pool.as_ref(), dst.split_rows_mut(&ranges)?, |stripe| {
            vertical_pass(&scratch, stripe, &self.weights)
        });
        log::debug!("vertical pass joined");

        Ok(dst)
    }
}
