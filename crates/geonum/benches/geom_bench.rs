//! Criterion benchmarks for the planar constructions.
//! Sizes: n in {10, 100, 500, 1000} uniformly random sites in the default bounds.
//! Results land under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use geonum::geom::{delaunay, voronoi, Bounds};
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_sites(n: usize, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Vector2::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
        .collect()
}

fn bench_geom(c: &mut Criterion) {
    let mut group = c.benchmark_group("geom");
    for &n in &[10usize, 100, 500, 1000] {
        group.bench_with_input(BenchmarkId::new("voronoi", n), &n, |b, &n| {
            b.iter_batched(
                || random_sites(n, 7),
                |sites| {
                    let _d = voronoi::compute(&sites, Bounds::default());
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("delaunay", n), &n, |b, &n| {
            b.iter_batched(
                || random_sites(n, 8),
                |sites| {
                    let _t = delaunay::compute(&sites);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_geom);
criterion_main!(benches);
