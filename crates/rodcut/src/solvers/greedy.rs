//! Density-ranked greedy rod cutting.
//!
//! Rank every length `1..=n` by `price / length` (descending; equal densities
//! by shorter length first), then repeatedly take the best-ranked length that
//! still fits the remaining rod until nothing fits. The ranking is reconsidered
//! from the top after every cut, so one length may be taken many times.

use std::cmp::Ordering;

use super::types::{check_table, CutPlan, RodSolver, SolveError};

/// One ranked cut length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityEntry {
    /// `price / length`, for display; ordering uses the exact ratio.
    pub density: f64,
    pub length: usize,
    pub price: u32,
}

impl DensityEntry {
    fn new(length: usize, price: u32) -> Self {
        Self {
            density: f64::from(price) / length as f64,
            length,
            price,
        }
    }

    /// Exact comparison of `price / length` by cross-multiplication.
    fn cmp_density(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.price) * other.length as u128;
        let rhs = u128::from(other.price) * self.length as u128;
        lhs.cmp(&rhs)
    }
}

/// The density heuristic as a `RodSolver`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl RodSolver for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve_len(&self, prices: &[u32], n: usize) -> Result<u64, SolveError> {
        solve_greedy(prices, n)
    }
}

/// Lengths `1..=n` ordered by density, highest first; ties go to the shorter length.
pub fn density_ranking(prices: &[u32], n: usize) -> Result<Vec<DensityEntry>, SolveError> {
    check_table(prices, n)?;
    let mut ranking: Vec<DensityEntry> = Vec::new();
    ranking
        .try_reserve_exact(n)
        .map_err(|_| SolveError::Allocation { n })?;
    ranking.extend(
        prices[..n]
            .iter()
            .enumerate()
            .map(|(i, &price)| DensityEntry::new(i + 1, price)),
    );
    ranking.sort_by(|a, b| b.cmp_density(a).then(a.length.cmp(&b.length)));
    Ok(ranking)
}

/// Total value collected by the greedy heuristic on a rod of length `n > 0`.
pub fn solve_greedy(prices: &[u32], n: usize) -> Result<u64, SolveError> {
    take_greedy(prices, n, |_| {})
}

/// Greedy value plus the pieces taken, in the order they were cut.
pub fn greedy_plan(prices: &[u32], n: usize) -> Result<CutPlan, SolveError> {
    let mut cuts = Vec::new();
    let value = take_greedy(prices, n, |len| cuts.push(len))?;
    Ok(CutPlan { value, cuts })
}

fn take_greedy<F: FnMut(usize)>(
    prices: &[u32],
    n: usize,
    mut on_cut: F,
) -> Result<u64, SolveError> {
    if n == 0 {
        return Err(SolveError::EmptyRod);
    }
    let ranking = density_ranking(prices, n)?;
    let mut total = 0u64;
    let mut remaining = n;
    // `remaining` only shrinks, so entries skipped once never fit again and the
    // rescan from the top can resume at `cursor`.
    let mut cursor = 0;
    while remaining > 0 {
        match ranking[cursor..]
            .iter()
            .position(|e| e.length <= remaining)
        {
            Some(offset) => {
                cursor += offset;
                let entry = ranking[cursor];
                total += u64::from(entry.price);
                remaining -= entry.length;
                on_cut(entry.length);
            }
            None => break,
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_orders_by_density_then_length() {
        // densities: 1, 3, 3, 2.5
        let ranking = density_ranking(&[1, 6, 9, 10], 4).unwrap();
        let lengths: Vec<usize> = ranking.iter().map(|e| e.length).collect();
        assert_eq!(lengths, vec![2, 3, 4, 1]);
        assert!((ranking[0].density - 3.0).abs() < 1e-12);
    }

    #[test]
    fn ranking_uses_exact_ratios() {
        // 1/3 and 2/6 are equal exactly; the shorter length ranks first.
        let ranking = density_ranking(&[1, 1, 1, 1, 1, 2], 6).unwrap();
        assert_eq!(ranking[0].length, 1);
        let pos3 = ranking.iter().position(|e| e.length == 3).unwrap();
        let pos6 = ranking.iter().position(|e| e.length == 6).unwrap();
        assert_eq!(pos6, pos3 + 1);
    }

    #[test]
    fn repeats_the_best_length() {
        // Length 2 has the best density and is taken twice before length 1.
        let plan = greedy_plan(&[1, 5, 6, 7, 8], 5).unwrap();
        assert_eq!(plan.cuts, vec![2, 2, 1]);
        assert_eq!(plan.value, 11);
    }
}
