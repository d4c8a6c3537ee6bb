use blurkit_image::{RowRange, RowStripeMut};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The requested worker count is invalid.
    #[error("worker count must be > 0, got {0}")]
    InvalidWorkerCount(usize),

    /// The worker threads could not be spawned.
    #[error("failed to spawn worker threads: {0}")]
    ThreadSpawnFailure(String),
}

/// Controls how the rows of an image are scheduled over worker threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use one worker per thread of the global Rayon pool.
    #[default]
    Auto,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads, one row range per thread.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has some overhead.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Number of workers, and therefore row ranges, the strategy asks for.
    ///
    /// # Errors
    ///
    /// Returns [`ParallelError::InvalidWorkerCount`] for `Fixed(0)`.
    pub fn num_workers(&self) -> Result<usize, ParallelError> {
        match *self {
            ExecutionStrategy::Serial => Ok(1),
            ExecutionStrategy::Auto => Ok(rayon::current_num_threads().max(1)),
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidWorkerCount(0)),
            ExecutionStrategy::Fixed(n) => Ok(n),
        }
    }
}

/// Split `[0, total_rows)` into `num_workers` contiguous ranges.
///
/// The first `total_rows % num_workers` ranges hold one extra row. When there
/// are more workers than rows, the trailing ranges are empty.
///
/// # Arguments
///
/// * `total_rows` - The number of rows to split.
/// * `num_workers` - The number of ranges to produce.
///
/// # Errors
///
/// Returns [`ParallelError::InvalidWorkerCount`] if `num_workers` is zero.
///
/// # Example
///
/// ```
/// use blurkit_image::RowRange;
/// use blurkit_imgproc::parallel::partition_rows;
///
/// let ranges = partition_rows(10, 3).unwrap();
///
/// assert_eq!(
///     ranges,
///     vec![RowRange::new(0, 4), RowRange::new(4, 7), RowRange::new(7, 10)]
/// );
/// ```
pub fn partition_rows(total_rows: usize, num_workers: usize) -> Result<Vec<RowRange>, ParallelError> {
    if num_workers == 0 {
        return Err(ParallelError::InvalidWorkerCount(num_workers));
    }

    let rows_per_worker = total_rows / num_workers;
    let remainder = total_rows % num_workers;

    let mut start_row = 0;
    let ranges = (0..num_workers)
        .map(|i| {
            let extra = usize::from(i < remainder);
            let end_row = start_row + rows_per_worker + extra;
            let range = RowRange::new(start_row, end_row);
            start_row = end_row;
            range
        })
        .collect();

    Ok(ranges)
}

/// Build a short lived thread pool with `num_workers` threads.
///
/// `build` turns the configured builder into a pool, usually `|b| b.build()`.
/// Returns `None` without calling `build` for a single worker, in which case
/// work runs on the caller's thread.
pub(crate) fn build_worker_pool<B>(
    num_workers: usize,
    build: B,
) -> Result<Option<ThreadPool>, ParallelError>
where
    B: FnOnce(ThreadPoolBuilder) -> Result<ThreadPool, ThreadPoolBuildError>,
{
    if num_workers <= 1 {
        return Ok(None);
    }

    let builder = ThreadPoolBuilder::new()
        .num_threads(num_workers)
        .thread_name(|i| format!("blurkit-worker-{i}"));

    let pool = build(builder).map_err(|e| ParallelError::ThreadSpawnFailure(e.to_string()))?;

    Ok(Some(pool))
}

/// Run `op` once per stripe and return after every call has finished.
///
/// With a pool, each stripe is handed to its own task inside a single scope,
/// so the return of this function is a barrier for all writes to the stripes.
pub(crate) fn for_each_stripe<'a, F>(
    pool: Option<&ThreadPool>,
    stripes: Vec<RowStripeMut<'a>>,
    op: F,
) where
    F: Fn(RowStripeMut<'a>) + Sync,
{
    match pool {
        Some(pool) => pool.scope(|s| {
            for stripe in stripes {
                let op = &op;
                s.spawn(move |_| {
                    log::trace!("worker running rows {:?}", stripe.range());
                    op(stripe)
                });
            }
        }),
        None => stripes.into_iter().for_each(op),
    }
}
