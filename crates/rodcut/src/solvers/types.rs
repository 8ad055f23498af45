//! Shared solver types: errors, cut plans, and the solver trait.

use std::fmt;

/// Failures shared by both solvers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveError {
    /// No price table was supplied.
    MissingTable,
    NegativeLength { n: i64 },
    /// The greedy solver needs at least one unit of rod.
    EmptyRod,
    /// The table prices fewer lengths than the rod is long.
    TableTooShort { len: usize, n: usize },
    /// Working storage for a rod of length `n` could not be reserved.
    Allocation { n: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTable => write!(f, "no price table supplied"),
            Self::NegativeLength { n } => write!(f, "rod length must be >= 0, got {n}"),
            Self::EmptyRod => write!(f, "rod length must be > 0"),
            Self::TableTooShort { len, n } => {
                write!(f, "price table covers {len} lengths, rod has length {n}")
            }
            Self::Allocation { n } => write!(f, "could not allocate solver buffers for n={n}"),
        }
    }
}

impl std::error::Error for SolveError {}

/// Total value plus the piece lengths realizing it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CutPlan {
    pub value: u64,
    pub cuts: Vec<usize>,
}

impl CutPlan {
    /// Rod length consumed by the pieces.
    pub fn total_length(&self) -> usize {
        self.cuts.iter().sum()
    }

    /// Value of the pieces re-priced against `prices`.
    pub fn priced_value(&self, prices: &[u32]) -> Option<u64> {
        self.cuts
            .iter()
            .map(|&len| len.checked_sub(1).and_then(|i| prices.get(i)).map(|&p| u64::from(p)))
            .sum()
    }
}

/// A rod-cutting strategy.
pub trait RodSolver {
    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Best value this strategy finds for a rod of length `n`.
    fn solve_len(&self, prices: &[u32], n: usize) -> Result<u64, SolveError>;

    /// Checked entry point: an absent table or a negative length is an error.
    fn solve(&self, table: Option<&[u32]>, n: i64) -> Result<u64, SolveError> {
        let prices = table.ok_or(SolveError::MissingTable)?;
        let n = usize::try_from(n).map_err(|_| SolveError::NegativeLength { n })?;
        self.solve_len(prices, n)
    }
}

pub(super) fn check_table(prices: &[u32], n: usize) -> Result<(), SolveError> {
    if prices.len() < n {
        return Err(SolveError::TableTooShort {
            len: prices.len(),
            n,
        });
    }
    Ok(())
}
