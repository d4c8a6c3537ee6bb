use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use blurkit_image::{ImageSize, PixelBuffer};
use blurkit_imgproc::filter::{gaussian_blur, gaussian_blur_with_strategy};
use blurkit_imgproc::parallel::ExecutionStrategy;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Blur");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for radius in [1, 5, 15].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * (2 * *radius + 1)) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, radius);

            let image_size = ImageSize {
                width: *width,
                height: *height,
            };
            let image = PixelBuffer::from_size_val(image_size, 127).unwrap();

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_serial", &parameter_string),
                &image,
                |b, i| {
                    b.iter(|| {
                        black_box(gaussian_blur_with_strategy(
                            i,
                            *radius,
                            ExecutionStrategy::Serial,
                        ))
                    })
                },
            );

            for num_workers in [2, 4, 8].iter() {
                group.bench_with_input(
                    BenchmarkId::new(
                        format!("gaussian_blur_workers_{}", num_workers),
                        &parameter_string,
                    ),
                    &image,
                    |b, i| b.iter(|| black_box(gaussian_blur(i, *radius, *num_workers))),
                );
            }

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_auto", &parameter_string),
                &image,
                |b, i| {
                    b.iter(|| {
                        black_box(gaussian_blur_with_strategy(
                            i,
                            *radius,
                            ExecutionStrategy::Auto,
                        ))
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
