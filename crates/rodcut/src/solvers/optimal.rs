//! Exact rod cutting via bottom-up dynamic programming.
//!
//! `best[i] = max_{1 <= j <= i} price[j-1] + best[i-j]` with `best[0] = 0`;
//! the `j = i` term is the uncut piece. O(n²) time, O(n) extra space.

use super::types::{check_table, CutPlan, RodSolver, SolveError};

/// The DP baseline as a `RodSolver`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Optimal;

impl RodSolver for Optimal {
    fn name(&self) -> &'static str {
        "dp"
    }

    fn solve_len(&self, prices: &[u32], n: usize) -> Result<u64, SolveError> {
        solve_optimal(prices, n)
    }
}

/// Maximum total value for a rod of length `n`; `n = 0` yields 0.
pub fn solve_optimal(prices: &[u32], n: usize) -> Result<u64, SolveError> {
    check_table(prices, n)?;
    let best = best_values(prices, n, None)?;
    Ok(best[n])
}

/// Maximum value plus one partition achieving it (smallest first piece on ties).
pub fn optimal_plan(prices: &[u32], n: usize) -> Result<CutPlan, SolveError> {
    check_table(prices, n)?;
    let mut first_cut: Vec<usize> = Vec::new();
    first_cut
        .try_reserve_exact(n + 1)
        .map_err(|_| SolveError::Allocation { n })?;
    first_cut.resize(n + 1, 0);
    let best = best_values(prices, n, Some(first_cut.as_mut_slice()))?;

    let mut cuts = Vec::new();
    let mut rest = n;
    while rest > 0 {
        let piece = first_cut[rest];
        cuts.push(piece);
        rest -= piece;
    }
    Ok(CutPlan {
        value: best[n],
        cuts,
    })
}

fn best_values(
    prices: &[u32],
    n: usize,
    mut first_cut: Option<&mut [usize]>,
) -> Result<Vec<u64>, SolveError> {
    let mut best: Vec<u64> = Vec::new();
    best.try_reserve_exact(n + 1)
        .map_err(|_| SolveError::Allocation { n })?;
    best.push(0);
    for i in 1..=n {
        let mut max_val = u64::from(prices[0]) + best[i - 1];
        let mut arg = 1;
        for j in 2..=i {
            let val = u64::from(prices[j - 1]) + best[i - j];
            if val > max_val {
                max_val = val;
                arg = j;
            }
        }
        if let Some(fc) = first_cut.as_deref_mut() {
            fc[i] = arg;
        }
        best.push(max_val);
    }
    Ok(best)
}
