use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bgstrip::{recolor, sample_background, BackgroundRemovalProcessor, ReachabilityMask, RemovalConfig};
use image::{DynamicImage, Rgba, RgbaImage};

/// Build a test image with a solid background and a centered foreground block
fn test_image(size: u32) -> DynamicImage {
    let background = Rgba([240, 240, 240, 255]);
    let foreground = Rgba([30, 60, 90, 255]);
    let mut buffer = RgbaImage::from_pixel(size, size, background);

    let start = size / 4;
    let end = (3 * size) / 4;
    for y in start..end {
        for x in start..end {
            buffer.put_pixel(x, y, foreground);
        }
    }

    DynamicImage::ImageRgba8(buffer)
}

fn bench_full_transform(c: &mut Criterion) {
    let processor = BackgroundRemovalProcessor::new(RemovalConfig::default()).unwrap();
    let mut group = c.benchmark_group("full_transform");

    for size in [64u32, 256, 512] {
        let image = test_image(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &image, |b, image| {
            b.iter(|| processor.process_image(black_box(image)).unwrap());
        });
    }

    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    for size in [64u32, 256, 512, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| ReachabilityMask::flood_filled(black_box(size), black_box(size)));
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let image = test_image(512).to_rgba8();
    let background = sample_background(&image).unwrap();
    let mask = ReachabilityMask::flood_filled(512, 512);

    c.bench_function("sample_background_512", |b| {
        b.iter(|| sample_background(black_box(&image)).unwrap());
    });

    c.bench_function("recolor_512", |b| {
        b.iter(|| recolor(black_box(&image), black_box(background), black_box(&mask)));
    });
}

criterion_group!(benches, bench_full_transform, bench_flood_fill, bench_stages);
criterion_main!(benches);
