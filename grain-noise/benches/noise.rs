#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use grain_noise::noise::{Octaves, Tiling};
use grain_noise::{
    PerlinOptions, SimplexOptions, TileOptions, pnoise3, pnoise3_tiled, pnoise3_with, snoise2,
    snoise3, snoise3_with, snoise4,
};
use std::hint::black_box;

/// Points along a skewed diagonal so consecutive samples land in different cells.
fn sample_points(count: u32) -> Vec<(f64, f64, f64)> {
    (0..count)
        .map(|i| {
            let t = f64::from(i) * 0.173;
            (t, t * 0.61 + 3.7, t * 1.37 - 11.2)
        })
        .collect()
}

// ── Single octave ───────────────────────────────────────────────────────────

fn bench_single_octave(c: &mut Criterion) {
    let points = sample_points(4096);

    let mut group = c.benchmark_group("single_octave");
    group.throughput(criterion::Throughput::Elements(points.len() as u64));
    group.bench_function("pnoise3", |b| {
        b.iter(|| {
            for &(x, y, z) in &points {
                black_box(pnoise3(black_box(x), y, z));
            }
        });
    });
    group.bench_function("snoise2", |b| {
        b.iter(|| {
            for &(x, y, _) in &points {
                black_box(snoise2(black_box(x), y));
            }
        });
    });
    group.bench_function("snoise3", |b| {
        b.iter(|| {
            for &(x, y, z) in &points {
                black_box(snoise3(black_box(x), y, z));
            }
        });
    });
    group.bench_function("snoise4", |b| {
        b.iter(|| {
            for &(x, y, z) in &points {
                black_box(snoise4(black_box(x), y, z, x - y));
            }
        });
    });
    group.finish();
}

// ── Fractal ─────────────────────────────────────────────────────────────────

fn bench_octaves(c: &mut Criterion) {
    let points = sample_points(1024);

    let mut group = c.benchmark_group("octaves");
    for count in [1, 4, 8] {
        let perlin = PerlinOptions::default().with_octaves(Octaves::new(count));
        let simplex = SimplexOptions::default().with_octaves(Octaves::new(count));
        let tiled = TileOptions::new(Tiling::cubic(16)).with_octaves(Octaves::new(count));

        group.bench_with_input(BenchmarkId::new("pnoise3", count), &perlin, |b, options| {
            b.iter(|| {
                for &(x, y, z) in &points {
                    black_box(pnoise3_with(x, y, z, options).ok());
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("snoise3", count), &simplex, |b, options| {
            b.iter(|| {
                for &(x, y, z) in &points {
                    black_box(snoise3_with(x, y, z, options).ok());
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("pnoise3_tiled", count), &tiled, |b, options| {
            b.iter(|| {
                for &(x, y, z) in &points {
                    black_box(pnoise3_tiled(x, y, z, options).ok());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_octave, bench_octaves);
criterion_main!(benches);
