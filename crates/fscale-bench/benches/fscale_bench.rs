//! Benchmarks for fscale operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use fscale_bench::pattern_frame;
use fscale_core::{PixelFormat, Resolution};
use fscale_ops::{resize, ScaleMode};

/// Benchmark precise against fast on each kernel family.
fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("mode");

    let target = Resolution::new(1280, 720);
    group.throughput(Throughput::Elements(target.pixel_count()));

    for format in [PixelFormat::Rgb24, PixelFormat::Bgra32, PixelFormat::Uyvy422] {
        let src = pattern_frame(format, 1920, 1080).unwrap();
        for mode in [ScaleMode::Precise, ScaleMode::Fast] {
            let id = BenchmarkId::new(mode.name(), format.name());
            group.bench_with_input(id, &src, |b, frame| {
                b.iter(|| resize(black_box(frame), target, mode, 1))
            });
        }
    }

    group.finish();
}

/// Benchmark row-band scaling across worker counts.
fn bench_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("workers");

    let src = pattern_frame(PixelFormat::Yuyv422, 3840, 2160).unwrap();
    let target = Resolution::new(1920, 1080);
    group.throughput(Throughput::Elements(target.pixel_count()));

    for workers in [1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("yuyv422_4k_to_hd", workers), &workers, |b, &w| {
            b.iter(|| resize(black_box(&src), target, ScaleMode::Fast, w))
        });
    }

    group.finish();
}

/// Benchmark upscaling, where the output dominates the work.
fn bench_upscale(c: &mut Criterion) {
    let mut group = c.benchmark_group("upscale");

    let src = pattern_frame(PixelFormat::Rgba32, 640, 360).unwrap();
    for (w, h) in [(1280u32, 720u32), (1920, 1080)] {
        let target = Resolution::new(w, h);
        group.throughput(Throughput::Elements(target.pixel_count()));
        group.bench_with_input(BenchmarkId::new("rgba32", target), &target, |b, &t| {
            b.iter(|| resize(black_box(&src), t, ScaleMode::Precise, 4))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_modes, bench_workers, bench_upscale);
criterion_main!(benches);
