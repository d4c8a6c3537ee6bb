use argh::FromArgs;
use std::path::PathBuf;

use blurkit::{imgproc, io::functional as F};

#[derive(FromArgs)]
/// Blur an image with a multi-threaded separable gaussian filter
struct Args {
    /// the blur radius in pixels
    #[argh(option, short = 'r')]
    radius: usize,

    /// the number of worker threads, defaults to one per available cpu
    #[argh(option, short = 'w')]
    workers: Option<usize>,

    /// how many times the blur is applied
    #[argh(option, default = "1")]
    iterations: usize,

    /// path to the input image (png, ppm or jpeg)
    #[argh(positional)]
    input: PathBuf,

    /// path to the output image (png, ppm or jpeg)
    #[argh(positional)]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let image = F::read_image_any_rgb8(&args.input)?;
    log::info!("read {} from {}", image.size(), args.input.display());

    let num_workers = match args.workers {
        Some(n) => n,
        None => imgproc::parallel::ExecutionStrategy::Auto.num_workers()?,
    };

    let now = std::time::Instant::now();
    let blurred =
        imgproc::filter::gaussian_blur_iterations(&image, args.radius, num_workers, args.iterations)?;
    log::info!(
        "blurred with radius {} on {} workers in {:?}",
        args.radius,
        num_workers,
        now.elapsed()
    );

    F::write_image_rgb8(&args.output, &blurred)?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}
