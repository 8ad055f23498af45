use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rodcut::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod analyze;
mod figure;
mod provenance;
mod sinks;

#[derive(Parser)]
#[command(name = "rodcut")]
#[command(about = "Greedy vs dynamic-programming rod cutting on adversarial price tables")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Sweep rod sizes, print the comparison table and write it under data/
    Run {
        #[arg(long, default_value_t = 1000)]
        start: usize,
        #[arg(long, default_value_t = 20000)]
        end: usize,
        #[arg(long, default_value_t = 1000)]
        step: usize,
        /// Master seed; drawn at random (and logged) when absent
        #[arg(long)]
        seed: Option<u64>,
        /// Defaults to `<exe dir>/../data`
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Only print to stdout
        #[arg(long)]
        no_persist: bool,
    },
    /// Summarize one or more results.csv files
    Analyze {
        #[arg(long = "from", required = true)]
        from: Vec<PathBuf>,
        /// Size separating the small and large ranges
        #[arg(long, default_value_t = 15000)]
        split: i64,
        /// Also write the report here (e.g. results/analysis_results.txt)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Plot value and time of both solvers against n as a two-panel SVG
    Figure {
        #[arg(long = "from", required = true)]
        from: Vec<PathBuf>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Run both solvers on the textbook table and the error cases
    Check,
}

/// Parameters recorded in the provenance sidecar.
#[derive(Serialize)]
struct RunParams {
    start: usize,
    end: usize,
    step: usize,
    seed: u64,
    skipped: Vec<usize>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            start,
            end,
            step,
            seed,
            out_dir,
            no_persist,
        } => run(SweepCfg { start, end, step }, seed, out_dir, no_persist),
        Action::Analyze { from, split, out } => analyze_cmd(from, split, out),
        Action::Figure { from, out } => figure_cmd(from, out),
        Action::Check => check(),
    }
}

fn run(cfg: SweepCfg, seed: Option<u64>, out_dir: Option<PathBuf>, no_persist: bool) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(start = cfg.start, end = cfg.end, step = cfg.step, seed, "run");

    let mut generator = PriceTableGenerator::new(GeneratorParams::default(), seed)
        .context("building the price table generator")?;
    println!("{}", rodcut::report::header());
    println!("{}", rodcut::report::separator());
    let report = run_sweep(&cfg, &mut generator, |record| {
        println!("{}", rodcut::report::format_row(record));
    })
    .context("running the sweep")?;

    println!();
    println!("{}", rodcut::report::summary_line(report.mean_ratio));
    for r in report.worst(3) {
        println!("  worst: n={} ratio={:.2}%", r.n, r.ratio);
    }
    if !report.skipped.is_empty() {
        tracing::warn!(skipped = ?report.skipped, "some sizes were skipped");
    }

    if no_persist {
        return Ok(());
    }
    let dir = match out_dir.map_or_else(sinks::default_data_dir, Ok) {
        Ok(dir) => dir,
        Err(err) => {
            tracing::debug!(err = %format!("{err:#}"), "results not persisted");
            return Ok(());
        }
    };
    let params = serde_json::to_value(RunParams {
        start: cfg.start,
        end: cfg.end,
        step: cfg.step,
        seed,
        skipped: report.skipped.clone(),
    })?;
    let written = sinks::persist(&report, &dir, seed, params);
    tracing::info!(dir = %dir.display(), files = written.len(), "results persisted");
    Ok(())
}

fn sources(from: &[PathBuf]) -> Vec<String> {
    from.iter().map(|p| p.display().to_string()).collect()
}

fn analyze_cmd(from: Vec<PathBuf>, split: i64, out: Option<PathBuf>) -> Result<()> {
    tracing::info!(files = from.len(), split, "analyze");
    let df = analyze::load(&from)?;
    let analysis = analyze::analyze(&df, split)?;
    let text = analyze::format_analysis(&analysis);
    print!("{text}");
    if let Some(out) = out {
        analyze::write_report(&out, &text)?;
        let params = serde_json::json!({ "from": sources(&from), "split": split });
        provenance::write_sidecar(&out, provenance::Payload::new(params))?;
        tracing::info!(out = %out.display(), "analysis written");
    }
    Ok(())
}

fn figure_cmd(from: Vec<PathBuf>, out: PathBuf) -> Result<()> {
    tracing::info!(files = from.len(), out = %out.display(), "figure");
    let df = analyze::load(&from)?;
    let curves = figure::curves(&df)?;
    figure::render(&curves, &out)?;
    let params = serde_json::json!({ "from": sources(&from), "sizes": curves.n.len() });
    provenance::write_sidecar(&out, provenance::Payload::new(params))?;
    Ok(())
}

fn check() -> Result<()> {
    let prices = [1u32, 5, 8, 9, 10];
    let n = prices.len();

    let dp = optimal_plan(&prices, n)?;
    println!("optimal value for n={n}: {} (expected 13), cuts {:?}", dp.value, dp.cuts);
    let greedy = greedy_plan(&prices, n)?;
    println!("greedy value for n={n}: {}, cuts {:?}", greedy.value, greedy.cuts);
    println!(
        "greedy/optimal: {:.2}%",
        quality_ratio(greedy.value, dp.value)
    );

    for solver in [&Optimal as &dyn RodSolver, &Greedy] {
        match solver.solve(None, 5) {
            Err(err) => println!("{} with no table: {err}", solver.name()),
            Ok(v) => anyhow::bail!("{} accepted a missing table ({v})", solver.name()),
        }
        match solver.solve(Some(&prices[..]), -1) {
            Err(err) => println!("{} with n=-1: {err}", solver.name()),
            Ok(v) => anyhow::bail!("{} accepted a negative length ({v})", solver.name()),
        }
    }

    anyhow::ensure!(dp.value == 13, "optimal value {} != 13", dp.value);
    Ok(())
}
