//! Criterion benchmarks for the two rod-cutting solvers.
//! Focus sizes: n in {500, 2000, 8000}. The DP is O(n²); the greedy is
//! dominated by its O(n log n) density sort.
//! Results: by default under target/criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rodcut::prices::{GeneratorParams, PriceTableGenerator, SeedReplay};
use rodcut::solvers::{density_ranking, solve_greedy, solve_optimal};

fn table(n: usize) -> Vec<u32> {
    let replay = SeedReplay { seed: 43, n };
    PriceTableGenerator::generate_single(&GeneratorParams::default(), replay)
        .unwrap()
        .into_vec()
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("solvers");
    group.sample_size(20);
    for &n in &[500usize, 2_000, 8_000] {
        let prices = table(n);
        group.bench_with_input(BenchmarkId::new("optimal", n), &n, |b, &n| {
            b.iter(|| black_box(solve_optimal(&prices, n).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("greedy", n), &n, |b, &n| {
            b.iter(|| black_box(solve_greedy(&prices, n).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("density_ranking", n), &n, |b, &n| {
            b.iter(|| black_box(density_ranking(&prices, n).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solvers);
criterion_main!(benches);
