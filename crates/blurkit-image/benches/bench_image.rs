use blurkit_image::{ImageSize, PixelBuffer, RowRange};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn sample_image() -> PixelBuffer {
    PixelBuffer::from_size_val(
        ImageSize {
            width: 1920,
            height: 1080,
        },
        127,
    )
    .unwrap()
}

fn bench_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("PixelBuffer");

    group.bench_function("to_interleaved", |b| {
        let image = sample_image();
        b.iter(|| black_box(&image).to_interleaved())
    });

    group.bench_function("from_interleaved", |b| {
        let image = sample_image();
        let data = image.to_interleaved();
        b.iter(|| PixelBuffer::from_interleaved(image.size(), black_box(&data)).unwrap())
    });

    group.bench_function("split_rows_mut_8", |b| {
        let ranges = (0..8)
            .map(|i| RowRange::new(i * 135, (i + 1) * 135))
            .collect::<Vec<_>>();
        b.iter_batched(
            sample_image,
            |mut image| {
                let stripes = image.split_rows_mut(black_box(&ranges)).unwrap();
                black_box(stripes.len())
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_image);
criterion_main!(benches);
