use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, Rgb, RgbImage};
use signaleo_img::compress::{compress_to_target, encode_jpeg, fit_dimensions, CompressOptions};

fn noise_image(width: u32, height: u32) -> DynamicImage {
    let mut state = 0x2545f4914f6cdd1d_u64;
    let buffer = RgbImage::from_fn(width, height, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        Rgb([
            (state >> 16) as u8,
            (state >> 32) as u8,
            (state >> 48) as u8,
        ])
    });
    DynamicImage::ImageRgb8(buffer)
}

fn bench_fit_dimensions(c: &mut Criterion) {
    c.bench_function("fit_dimensions", |b| {
        b.iter(|| fit_dimensions(black_box(4000), black_box(3000), black_box(1280)))
    });
}

fn bench_encode_jpeg(c: &mut Criterion) {
    let surface = noise_image(640, 480).to_rgb8();
    let mut group = c.benchmark_group("encode_jpeg");

    for quality in [85u8, 50, 10].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(quality),
            quality,
            |b, &quality| b.iter(|| encode_jpeg(black_box(&surface), black_box(quality))),
        );
    }

    group.finish();
}

fn bench_compress_to_target(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_to_target");

    let flat = DynamicImage::new_rgb8(1920, 1080);
    let options = CompressOptions::default();
    group.bench_function("flat_1920x1080", |b| {
        b.iter(|| compress_to_target(black_box(&flat), black_box(&options)))
    });

    // Noise forces the full quality ladder and the fallback pass
    let noisy = noise_image(512, 512);
    let tight = CompressOptions::new(Some(8192), None).unwrap();
    group.bench_function("noise_512x512_tight_target", |b| {
        b.iter(|| compress_to_target(black_box(&noisy), black_box(&tight)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_fit_dimensions,
    bench_encode_jpeg,
    bench_compress_to_target
);
criterion_main!(benches);
