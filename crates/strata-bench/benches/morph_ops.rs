//! Criterion micro-benchmarks for parallel morphology.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use strata_access::Layout;
use strata_bench::noise_image;
use strata_morph::{erode, open, HyperSphereShape, MorphConfig, RectangleShape};
use strata_store::ChunkConfig;

/// Benchmark: 3x3 erosion of a 1024x1024 image across thread counts.
fn bench_erode_threads(c: &mut Criterion) {
    let img = noise_image(Layout::Flat, &[1024, 1024], 4);
    let shape = RectangleShape::new(1, false);
    let auto = MorphConfig::default().resolved_threads();

    let mut group = c.benchmark_group("erode_3x3_1024sq");
    for threads in [1, 2, 4, 8, auto] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &t| {
            b.iter(|| black_box(erode(&img, &shape, t).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: opening with a radius-3 ball on flat vs chunked storage.
fn bench_open_layouts(c: &mut Criterion) {
    let shape = HyperSphereShape::new(3);
    let mut group = c.benchmark_group("open_sphere3_256sq");
    for (label, layout) in [
        ("flat", Layout::Flat),
        ("chunked", Layout::Chunked(ChunkConfig::new(16))),
    ] {
        let img = noise_image(layout, &[256, 256], 5);
        group.bench_function(label, |b| {
            b.iter(|| black_box(open(&img, &shape, 4).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_erode_threads, bench_open_layouts);
criterion_main!(benches);
