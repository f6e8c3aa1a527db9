//! Criterion micro-benchmarks for cursor traversal and boundary access.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use strata_access::{rearrange_quadrants, Advance, Localize, Mirror, Position, Read};
use strata_bench::{bench_layouts, noise_image};

/// Benchmark: sum all 1M cells of a 100^3 container with a sequential cursor.
fn bench_sequential_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_sum_100cubed");
    for (label, layout) in bench_layouts() {
        let img = noise_image(layout, &[100, 100, 100], 1);
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut cursor = img.cursor();
                let mut total = 0u64;
                while cursor.has_next() {
                    cursor.advance().unwrap();
                    total += u64::from(*cursor.get().unwrap());
                }
                black_box(total)
            });
        });
    }
    group.finish();
}

/// Benchmark: localizing walk plus random-access reads one cell to the left,
/// mirrored at the border, over a 512x512 image.
fn bench_mirrored_neighbour(c: &mut Criterion) {
    let mut group = c.benchmark_group("mirrored_neighbour_512sq");
    for (label, layout) in bench_layouts() {
        let img = noise_image(layout, &[512, 512], 2);
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut walk = img.localizing_cursor();
                let mut reader = img.extended_access(Mirror::default());
                let mut pos = [0i64; 2];
                let mut acc = 0u64;
                while walk.has_next() {
                    walk.advance().unwrap();
                    walk.localize(&mut pos);
                    pos[0] -= 1;
                    reader.set_position(&pos).unwrap();
                    acc += u64::from(*reader.get().unwrap());
                }
                black_box(acc)
            });
        });
    }
    group.finish();
}

/// Benchmark: forward quadrant swap of a 128^3 container on 8 threads.
fn bench_rearrange_quadrants(c: &mut Criterion) {
    let mut group = c.benchmark_group("rearrange_quadrants_128cubed");
    for (label, layout) in bench_layouts() {
        let img = noise_image(layout, &[128, 128, 128], 3);
        group.bench_function(label, |b| {
            b.iter(|| black_box(rearrange_quadrants(&img, false, 8).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_sum,
    bench_mirrored_neighbour,
    bench_rearrange_quadrants
);
criterion_main!(benches);
