//! Rod-cutting solvers.
//!
//! - `optimal`: bottom-up DP over rod prefixes; the exact baseline.
//! - `greedy`: repeated best-fit over a price-density ranking.
//!
//! Both read prices as `&[u32]` where slot `i` prices a piece of length `i + 1`.
//! `RodSolver::solve` is the checked entry point (absent table, negative length);
//! the free functions take a length that is already known to be non-negative.

mod greedy;
mod optimal;
mod types;

pub use greedy::{density_ranking, greedy_plan, solve_greedy, DensityEntry, Greedy};
pub use optimal::{optimal_plan, solve_optimal, Optimal};
pub use types::{CutPlan, RodSolver, SolveError};
