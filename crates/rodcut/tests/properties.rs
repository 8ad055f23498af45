use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use rodcut::prices::{generate_with, GeneratorParams, PriceTable};
use rodcut::solvers::{greedy_plan, optimal_plan, solve_greedy, solve_optimal};

/// Brute force over all partitions for tiny rods.
fn brute_force(prices: &[u32], n: usize) -> u64 {
    if n == 0 {
        return 0;
    }
    (1..=n)
        .map(|j| u64::from(prices[j - 1]) + brute_force(prices, n - j))
        .max()
        .unwrap_or(0)
}

fn strictly_increasing_prices() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..20, 1..40).prop_map(|steps| {
        steps
            .iter()
            .scan(0u32, |acc, s| {
                *acc += s;
                Some(*acc)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn greedy_never_beats_optimal(prices in prop::collection::vec(1u32..500, 1..80)) {
        let n = prices.len();
        let greedy = solve_greedy(&prices, n).unwrap();
        let optimal = solve_optimal(&prices, n).unwrap();
        prop_assert!(greedy <= optimal);
    }

    #[test]
    fn optimal_matches_brute_force(prices in prop::collection::vec(1u32..50, 1..12)) {
        let n = prices.len();
        prop_assert_eq!(solve_optimal(&prices, n).unwrap(), brute_force(&prices, n));
    }

    #[test]
    fn plans_are_consistent(prices in strictly_increasing_prices()) {
        let table = PriceTable::new(prices).unwrap();
        let n = table.len();
        let dp = optimal_plan(table.as_slice(), n).unwrap();
        prop_assert_eq!(dp.total_length(), n);
        prop_assert_eq!(dp.priced_value(table.as_slice()), Some(dp.value));
        prop_assert_eq!(dp.value, solve_optimal(table.as_slice(), n).unwrap());

        let greedy = greedy_plan(table.as_slice(), n).unwrap();
        prop_assert!(greedy.total_length() <= n);
        prop_assert_eq!(greedy.priced_value(table.as_slice()), Some(greedy.value));
        prop_assert_eq!(greedy.value, solve_greedy(table.as_slice(), n).unwrap());
    }

    #[test]
    fn generated_tables_keep_their_invariants(n in 1usize..3000, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let table = generate_with(n, &GeneratorParams::default(), &mut rng).unwrap();
        let p = table.as_slice();
        prop_assert_eq!(p.len(), n);
        prop_assert!(p[0] >= 1 && p[0] as usize <= n);
        for i in 1..n {
            prop_assert!(p[i] > p[i - 1], "not increasing at length {}", i + 1);
            // Entries above n come only from the forced unit-step tail.
            prop_assert!(p[i] as usize <= n + i, "length {} priced {}", i + 1, p[i]);
        }
    }

    #[test]
    fn greedy_is_deterministic_on_generated_tables(n in 1usize..500, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let table = generate_with(n, &GeneratorParams::default(), &mut rng).unwrap();
        let a = greedy_plan(table.as_slice(), n).unwrap();
        let b = greedy_plan(table.as_slice(), n).unwrap();
        prop_assert_eq!(a, b);
    }
}
