//! Divergence probe for a single adversarial table.
//!
//! Purpose
//! - Show *how* the greedy partition differs from the DP partition on one
//!   generated table, not just by how much.
//! - Print the top of the density ranking next to the piece counts each
//!   solver ends up with.
//!
//! Run: `cargo run -p rodcut --example divergence_probe --release -- 5000 42`

use std::collections::BTreeMap;
use std::time::Instant;

use rodcut::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let n: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(5000);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let replay = SeedReplay { seed, n };
    let table = PriceTableGenerator::generate_single(&GeneratorParams::default(), replay)
        .expect("table generation");
    let prices = table.as_slice();

    let dp_start = Instant::now();
    let dp = optimal_plan(prices, n).expect("dp plan");
    let dp_ms = dp_start.elapsed().as_secs_f64() * 1e3;

    let greedy_start = Instant::now();
    let greedy = greedy_plan(prices, n).expect("greedy plan");
    let greedy_ms = greedy_start.elapsed().as_secs_f64() * 1e3;

    println!("n={n} seed={seed} max_price={}", prices[n - 1]);
    println!(
        "dp={} greedy={} ratio={:.4}%",
        dp.value,
        greedy.value,
        quality_ratio(greedy.value, dp.value)
    );
    println!("dp_time_ms={dp_ms:.3} greedy_time_ms={greedy_ms:.3}");

    let ranking = density_ranking(prices, n).expect("ranking");
    println!("top densities:");
    for e in ranking.iter().take(5) {
        println!("  len={:>6} price={:>8} density={:.4}", e.length, e.price, e.density);
    }
    println!("dp pieces:     {:?}", piece_counts(&dp.cuts));
    println!("greedy pieces: {:?}", piece_counts(&greedy.cuts));
}

fn piece_counts(cuts: &[usize]) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for &c in cuts {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}
