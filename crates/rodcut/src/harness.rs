//! Benchmark sweep: generate, solve twice, compare.
//!
//! For every size of an inclusive arithmetic sweep the harness draws a fresh
//! adversarial table, times the DP and the greedy solver on it independently,
//! and records the quality ratio `100 × greedy / optimal`. Each table lives for
//! exactly one iteration. Failed sizes are skipped, never retried.

use std::fmt;
use std::time::{Duration, Instant};

use crate::prices::PriceTableGenerator;
use crate::solvers::{Greedy, Optimal, RodSolver, SolveError};

/// Errors that abort a whole sweep.
#[derive(Debug)]
pub enum HarnessError {
    InvalidSweep { reason: String },
    /// The results buffer could not be reserved.
    Allocation { records: usize },
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSweep { reason } => write!(f, "invalid sweep: {reason}"),
            Self::Allocation { records } => {
                write!(f, "could not allocate room for {records} benchmark records")
            }
        }
    }
}

impl std::error::Error for HarnessError {}

/// Inclusive sweep `start, start + step, …, <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepCfg {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl Default for SweepCfg {
    fn default() -> Self {
        Self {
            start: 1000,
            end: 20000,
            step: 1000,
        }
    }
}

impl SweepCfg {
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.step == 0 {
            return Err(HarnessError::InvalidSweep {
                reason: "step must be > 0".into(),
            });
        }
        if self.start > self.end {
            return Err(HarnessError::InvalidSweep {
                reason: format!("start {} exceeds end {}", self.start, self.end),
            });
        }
        Ok(())
    }

    /// Number of sizes in the sweep; `None` when it does not fit in `usize`
    /// (assumes a valid config).
    pub fn count(&self) -> Option<usize> {
        ((self.end - self.start) / self.step).checked_add(1)
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.start..=self.end).step_by(self.step)
    }
}

/// Outcome of both solvers on one table.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkRecord {
    pub n: usize,
    pub optimal_value: u64,
    pub optimal_elapsed: Duration,
    pub greedy_value: u64,
    pub greedy_elapsed: Duration,
    /// `100 × greedy / optimal`, or 0 when the optimum is 0.
    pub ratio: f64,
}

/// Quality ratio in percent; 0 when `optimal` is 0.
pub fn quality_ratio(greedy: u64, optimal: u64) -> f64 {
    if optimal == 0 {
        0.0
    } else {
        100.0 * greedy as f64 / optimal as f64
    }
}

/// All records of a sweep plus the summary statistic.
#[derive(Clone, Debug, Default)]
pub struct BenchmarkReport {
    pub records: Vec<BenchmarkRecord>,
    /// Arithmetic mean of the ratios; `None` when no size succeeded.
    pub mean_ratio: Option<f64>,
    /// Sizes dropped because generation or solving failed.
    pub skipped: Vec<usize>,
}

impl BenchmarkReport {
    pub fn from_records(records: Vec<BenchmarkRecord>, skipped: Vec<usize>) -> Self {
        let mean_ratio = mean_ratio(&records);
        Self {
            records,
            mean_ratio,
            skipped,
        }
    }

    /// Up to `k` records with the lowest ratio, worst first.
    pub fn worst(&self, k: usize) -> Vec<&BenchmarkRecord> {
        let mut sorted: Vec<&BenchmarkRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.ratio.total_cmp(&b.ratio).then(a.n.cmp(&b.n)));
        sorted.truncate(k);
        sorted
    }
}

pub fn mean_ratio(records: &[BenchmarkRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    Some(records.iter().map(|r| r.ratio).sum::<f64>() / records.len() as f64)
}

fn timed(solver: &dyn RodSolver, prices: &[u32], n: usize) -> Result<(u64, Duration), SolveError> {
    let start = Instant::now();
    let value = solver.solve_len(prices, n)?;
    Ok((value, start.elapsed()))
}

/// Time both solvers on one table of length `n`.
pub fn measure(prices: &[u32], n: usize) -> Result<BenchmarkRecord, SolveError> {
    let (optimal_value, optimal_elapsed) = timed(&Optimal, prices, n)?;
    let (greedy_value, greedy_elapsed) = timed(&Greedy, prices, n)?;
    Ok(BenchmarkRecord {
        n,
        optimal_value,
        optimal_elapsed,
        greedy_value,
        greedy_elapsed,
        ratio: quality_ratio(greedy_value, optimal_value),
    })
}

/// Run the sweep, calling `observe` after each recorded size.
pub fn run_sweep<F>(
    cfg: &SweepCfg,
    generator: &mut PriceTableGenerator,
    mut observe: F,
) -> Result<BenchmarkReport, HarnessError>
where
    F: FnMut(&BenchmarkRecord),
{
    cfg.validate()?;
    let capacity = cfg.count().ok_or(HarnessError::Allocation {
        records: usize::MAX,
    })?;
    let mut records: Vec<BenchmarkRecord> = Vec::new();
    records
        .try_reserve_exact(capacity)
        .map_err(|_| HarnessError::Allocation { records: capacity })?;
    let mut skipped = Vec::new();

    for n in cfg.sizes() {
        let sample = match generator.generate_next(n) {
            Ok(sample) => sample,
            Err(err) => {
                tracing::warn!(n, %err, "skipping size: table generation failed");
                skipped.push(n);
                continue;
            }
        };
        match measure(sample.table.as_slice(), n) {
            Ok(record) => {
                tracing::debug!(
                    n,
                    seed = sample.replay.seed,
                    dp = record.optimal_value,
                    greedy = record.greedy_value,
                    ratio = record.ratio,
                    "size done"
                );
                observe(&record);
                records.push(record);
            }
            Err(err) => {
                tracing::warn!(n, %err, "skipping size: solver failed");
                skipped.push(n);
            }
        }
    }

    Ok(BenchmarkReport::from_records(records, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::GeneratorParams;

    fn record(n: usize, ratio: f64) -> BenchmarkRecord {
        BenchmarkRecord {
            n,
            optimal_value: 100,
            optimal_elapsed: Duration::ZERO,
            greedy_value: ratio as u64,
            greedy_elapsed: Duration::ZERO,
            ratio,
        }
    }

    #[test]
    fn sweep_sizes_are_inclusive() {
        let cfg = SweepCfg {
            start: 1000,
            end: 3000,
            step: 1000,
        };
        assert_eq!(cfg.sizes().collect::<Vec<_>>(), vec![1000, 2000, 3000]);
        assert_eq!(cfg.count(), Some(3));
        let ragged = SweepCfg {
            start: 5,
            end: 11,
            step: 3,
        };
        assert_eq!(ragged.sizes().collect::<Vec<_>>(), vec![5, 8, 11]);
        assert_eq!(SweepCfg::default().count(), Some(20));
    }

    #[test]
    fn oversized_sweeps_fail_allocation() {
        let mut gen = PriceTableGenerator::new(GeneratorParams::default(), 1).unwrap();
        let full = SweepCfg {
            start: 0,
            end: usize::MAX,
            step: 1,
        };
        assert_eq!(full.count(), None);
        assert!(matches!(
            run_sweep(&full, &mut gen, |_| {}),
            Err(HarnessError::Allocation { .. })
        ));
        // Countable, but far too many records to reserve.
        let half = SweepCfg { step: 2, ..full };
        assert_eq!(half.count(), Some(usize::MAX / 2 + 1));
        assert!(matches!(
            run_sweep(&half, &mut gen, |_| {}),
            Err(HarnessError::Allocation { .. })
        ));
    }

    #[test]
    fn invalid_sweeps_are_rejected() {
        let mut gen = PriceTableGenerator::new(GeneratorParams::default(), 1).unwrap();
        for cfg in [
            SweepCfg {
                start: 10,
                end: 20,
                step: 0,
            },
            SweepCfg {
                start: 30,
                end: 20,
                step: 5,
            },
        ] {
            assert!(matches!(
                run_sweep(&cfg, &mut gen, |_| {}),
                Err(HarnessError::InvalidSweep { .. })
            ));
        }
    }

    #[test]
    fn ratio_handles_zero_optimum() {
        assert_eq!(quality_ratio(5, 0), 0.0);
        assert!((quality_ratio(3, 4) - 75.0).abs() < 1e-12);
    }

    #[test]
    fn zero_size_is_skipped_not_fatal() {
        let mut gen = PriceTableGenerator::new(GeneratorParams::default(), 7).unwrap();
        let cfg = SweepCfg {
            start: 0,
            end: 20,
            step: 10,
        };
        let mut seen = Vec::new();
        let report = run_sweep(&cfg, &mut gen, |r| seen.push(r.n)).unwrap();
        assert_eq!(report.skipped, vec![0]);
        assert_eq!(seen, vec![10, 20]);
        assert_eq!(report.records.len(), 2);
    }

    #[test]
    fn mean_and_worst() {
        let records = vec![record(1, 90.0), record(2, 80.0), record(3, 100.0)];
        let report = BenchmarkReport::from_records(records, vec![]);
        assert!((report.mean_ratio.unwrap() - 90.0).abs() < 1e-12);
        let worst: Vec<usize> = report.worst(2).iter().map(|r| r.n).collect();
        assert_eq!(worst, vec![2, 1]);
        assert_eq!(BenchmarkReport::default().mean_ratio, None);
        assert_eq!(mean_ratio(&[]), None);
    }
}
