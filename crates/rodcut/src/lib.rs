//! Rod cutting: exact DP versus a density-greedy heuristic on adversarial tables.
//!
//! Layout
//! - `prices`: price tables and the adversarial generator (jumps + density valleys).
//! - `solvers`: the DP baseline and the density-ranked greedy heuristic.
//! - `harness`: size sweeps that time both solvers and record the quality ratio.
//! - `report`: fixed-width result tables and the `ResultSink` seam.
//!
//! The greedy solver is here to be beaten; it is not a recommended strategy.

pub mod harness;
pub mod prices;
pub mod report;
pub mod solvers;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for callers.
pub mod prelude {
    pub use crate::harness::{
        measure, quality_ratio, run_sweep, BenchmarkRecord, BenchmarkReport, HarnessError,
        SweepCfg,
    };
    pub use crate::prices::{
        generate_with, GeneratorError, GeneratorParams, PriceTable, PriceTableGenerator,
        SeedReplay, TableError, TableSample,
    };
    pub use crate::report::{render_table, ResultSink, SinkError, TableSink};
    pub use crate::solvers::{
        density_ranking, greedy_plan, optimal_plan, solve_greedy, solve_optimal, CutPlan,
        DensityEntry, Greedy, Optimal, RodSolver, SolveError,
    };
}
