//! Criterion microbenches for the adversarial price-table generator.
//!
//! - `generate_single`: one replayable table per size.
//! - `generate_next`: streaming draws from a seeded master generator.
//!
//! Results live under `target/criterion`.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rodcut::prices::{GeneratorParams, PriceTableGenerator, SeedReplay};

fn bench_gen(c: &mut Criterion) {
    let mut group = c.benchmark_group("prices_gen");
    let params = GeneratorParams::default();
    for &n in &[1_000usize, 5_000, 20_000] {
        group.bench_with_input(BenchmarkId::new("generate_single", n), &n, |b, &n| {
            b.iter_batched(
                || SeedReplay {
                    seed: StdRng::seed_from_u64(n as u64).gen::<u64>(),
                    n,
                },
                |replay| {
                    let _ = black_box(PriceTableGenerator::generate_single(&params, replay));
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("generate_next", n), &n, |b, &n| {
            b.iter_batched(
                || PriceTableGenerator::new(params.clone(), 2025).unwrap(),
                |mut gen| {
                    let _ = black_box(gen.generate_next(n).unwrap());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_gen);
criterion_main!(benches);
