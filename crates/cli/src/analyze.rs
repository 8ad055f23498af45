//! Cross-run analysis of `results.csv` files.
//!
//! Several sweeps (usually with different seeds) are stacked and summarized:
//! overall ratio spread, solver timings, DP time growth, how much the values
//! move between runs, the worst cases, a split into small and large sizes, and
//! the sizes where the per-n mean ratio moves the most.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;

/// Ratio statistics over some subset of rows.
#[derive(Clone, Debug, PartialEq)]
pub struct RatioStats {
    pub rows: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub mean_t_dp: Option<f64>,
    pub mean_t_greedy: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub overall: RatioStats,
    /// Relative change of the per-n mean DP time from the smallest to the largest n.
    pub dp_growth: Option<f64>,
    /// Per-n std of `(v_dp, v_greedy)` across runs, averaged over n.
    pub value_std: (Option<f64>, Option<f64>),
    /// Lowest ratios as `(n, ratio)`, worst first.
    pub worst: Vec<(i64, f64)>,
    pub split: i64,
    pub below: RatioStats,
    pub at_or_above: RatioStats,
    /// Mean ratio per size, ascending by n.
    pub per_n: Vec<(i64, f64)>,
    /// Sizes where the per-n mean ratio jumps the most from the previous size.
    pub inflections: Vec<i64>,
}

const WORST_CASES: usize = 5;
const INFLECTIONS: usize = 3;

/// Stack the CSVs into one frame with normalized column types.
pub fn load(paths: &[PathBuf]) -> Result<DataFrame> {
    let frames = paths
        .iter()
        .map(|p| {
            LazyCsvReader::new(p)
                .with_has_header(true)
                .with_infer_schema_length(Some(100))
                .finish()
                .with_context(|| format!("reading {}", p.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let stacked = concat(frames, UnionArgs::default())?;
    let df = stacked
        .select([
            col("n").cast(DataType::Int64),
            col("v_dp").cast(DataType::Float64),
            col("v_greedy").cast(DataType::Float64),
            col("t_dp").cast(DataType::Float64),
            col("t_greedy").cast(DataType::Float64),
            col("ratio").cast(DataType::Float64),
        ])
        .collect()?;
    Ok(df)
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    Ok(df.column(name)?.f64()?.into_iter().collect())
}

fn i64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    Ok(df.column(name)?.i64()?.into_iter().collect())
}

fn ratio_stats(df: &DataFrame) -> Result<RatioStats> {
    let ratio = df.column("ratio")?.f64()?;
    Ok(RatioStats {
        rows: df.height(),
        mean: ratio.mean(),
        std: ratio.std(1),
        mean_t_dp: df.column("t_dp")?.f64()?.mean(),
        mean_t_greedy: df.column("t_greedy")?.f64()?.mean(),
    })
}

pub fn analyze(df: &DataFrame, split: i64) -> Result<Analysis> {
    let overall = ratio_stats(df)?;

    let by_n = df
        .clone()
        .lazy()
        .group_by([col("n")])
        .agg([
            col("ratio").mean(),
            col("t_dp").mean(),
            col("v_dp").std(1).alias("v_dp_std"),
            col("v_greedy").std(1).alias("v_greedy_std"),
        ])
        .sort(["n"], SortMultipleOptions::default())
        .collect()?;
    let sizes = i64_column(&by_n, "n")?;
    let ratios = f64_column(&by_n, "ratio")?;
    let per_n: Vec<(i64, f64)> = sizes
        .iter()
        .zip(&ratios)
        .filter_map(|(n, r)| Some(((*n)?, (*r)?)))
        .collect();

    let t_dp: Vec<f64> = f64_column(&by_n, "t_dp")?.into_iter().flatten().collect();
    let dp_growth = match (t_dp.first(), t_dp.last()) {
        (Some(&first), Some(&last)) if t_dp.len() > 1 && first > 0.0 => {
            Some((last - first) / first)
        }
        _ => None,
    };

    let value_std = (
        mean_finite(&f64_column(&by_n, "v_dp_std")?),
        mean_finite(&f64_column(&by_n, "v_greedy_std")?),
    );

    let worst_df = df
        .clone()
        .lazy()
        .sort(["ratio", "n"], SortMultipleOptions::default())
        .limit(WORST_CASES as IdxSize)
        .collect()?;
    let worst = i64_column(&worst_df, "n")?
        .into_iter()
        .zip(f64_column(&worst_df, "ratio")?)
        .filter_map(|(n, r)| Some((n?, r?)))
        .collect();

    let below = df
        .clone()
        .lazy()
        .filter(col("n").lt(lit(split)))
        .collect()?;
    let at_or_above = df
        .clone()
        .lazy()
        .filter(col("n").gt_eq(lit(split)))
        .collect()?;

    Ok(Analysis {
        overall,
        dp_growth,
        value_std,
        worst,
        split,
        below: ratio_stats(&below)?,
        at_or_above: ratio_stats(&at_or_above)?,
        inflections: inflections(&per_n, INFLECTIONS),
        per_n,
    })
}

/// Mean of the defined values; single-run sizes have no std and are left out.
fn mean_finite(values: &[Option<f64>]) -> Option<f64> {
    let defined: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    if defined.is_empty() {
        return None;
    }
    Some(defined.iter().sum::<f64>() / defined.len() as f64)
}

/// Sizes with the largest absolute change in mean ratio versus the previous size.
fn inflections(per_n: &[(i64, f64)], k: usize) -> Vec<i64> {
    let mut jumps: Vec<(f64, i64)> = per_n
        .windows(2)
        .map(|w| ((w[1].1 - w[0].1).abs(), w[1].0))
        .collect();
    jumps.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    jumps.into_iter().take(k).map(|(_, n)| n).collect()
}

fn opt(v: Option<f64>, prec: usize) -> String {
    v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.prec$}"))
}

fn push_stats(out: &mut String, label: &str, s: &RatioStats) {
    let _ = writeln!(out, "{label} ({} rows)", s.rows);
    let _ = writeln!(out, "  mean ratio:     {}%", opt(s.mean, 2));
    let _ = writeln!(out, "  std ratio:      {}", opt(s.std, 4));
    let _ = writeln!(out, "  mean DP time:   {} s", opt(s.mean_t_dp, 6));
    let _ = writeln!(out, "  mean greedy:    {} s", opt(s.mean_t_greedy, 6));
}

pub fn format_analysis(a: &Analysis) -> String {
    let mut out = String::new();
    push_stats(&mut out, "overall", &a.overall);
    let growth = a
        .dp_growth
        .map_or_else(|| "n/a".to_string(), |g| format!("{:.2}%", g * 100.0));
    let _ = writeln!(out, "  DP time growth: {growth}");

    out.push_str("\nvalue std across runs\n");
    let _ = writeln!(out, "  DP:     {}", opt(a.value_std.0, 2));
    let _ = writeln!(out, "  greedy: {}", opt(a.value_std.1, 2));

    out.push_str("\nworst cases\n");
    for (n, ratio) in &a.worst {
        let _ = writeln!(out, "  n={n}: {ratio:.2}%");
    }

    out.push('\n');
    push_stats(&mut out, &format!("n < {}", a.split), &a.below);
    push_stats(&mut out, &format!("n >= {}", a.split), &a.at_or_above);

    out.push_str("\nper-n mean ratio\n");
    for (n, ratio) in &a.per_n {
        let _ = writeln!(out, "  {n:>7} {ratio:>9.2}%");
    }

    out.push_str("\ninflection points\n");
    for n in &a.inflections {
        let _ = writeln!(out, "  n={n}");
    }
    out
}

/// Write the formatted analysis, creating parent directories.
pub fn write_report(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::CsvSink;
    use rodcut::prelude::*;
    use std::time::Duration;
    use tempfile::tempdir;

    fn record(n: usize, greedy: u64, dp_ms: u64) -> BenchmarkRecord {
        BenchmarkRecord {
            n,
            optimal_value: 100,
            optimal_elapsed: Duration::from_millis(dp_ms),
            greedy_value: greedy,
            greedy_elapsed: Duration::from_micros(10),
            ratio: quality_ratio(greedy, 100),
        }
    }

    fn write_run(dir: &std::path::Path, name: &str, records: Vec<BenchmarkRecord>) -> PathBuf {
        let path = dir.join(name);
        let report = BenchmarkReport::from_records(records, vec![]);
        CsvSink::new(&path).publish(&report).unwrap();
        path
    }

    #[test]
    fn stacks_runs_and_summarizes() {
        let dir = tempdir().unwrap();
        let a = write_run(
            dir.path(),
            "a.csv",
            vec![record(100, 90, 1), record(200, 96, 2), record(300, 99, 4)],
        );
        let b = write_run(
            dir.path(),
            "b.csv",
            vec![record(100, 94, 1), record(200, 98, 2), record(300, 97, 4)],
        );
        let df = load(&[a, b]).unwrap();
        assert_eq!(df.height(), 6);

        let analysis = analyze(&df, 200).unwrap();
        assert_eq!(analysis.overall.rows, 6);
        assert!((analysis.overall.mean.unwrap() - 95.666_666_666).abs() < 1e-6);
        assert_eq!(analysis.per_n.len(), 3);
        assert_eq!(analysis.per_n[0], (100, 92.0));
        assert_eq!(analysis.worst[0], (100, 90.0));
        assert_eq!(analysis.worst.len(), 5);
        assert_eq!(analysis.below.rows, 2);
        assert_eq!(analysis.at_or_above.rows, 4);
        // Mean DP time goes 1 ms -> 4 ms.
        assert!((analysis.dp_growth.unwrap() - 3.0).abs() < 1e-9);
        assert_eq!(analysis.inflections, vec![200, 300]);
        // v_dp is 100 everywhere; v_greedy pairs (90, 94), (96, 98), (99, 97).
        let (dp_std, greedy_std) = analysis.value_std;
        assert!(dp_std.unwrap().abs() < 1e-12);
        let want = (8f64.sqrt() + 2f64.sqrt() + 2f64.sqrt()) / 3.0;
        assert!((greedy_std.unwrap() - want).abs() < 1e-9);

        let text = format_analysis(&analysis);
        assert!(text.contains("n=100: 90.00%"));
        assert!(text.contains("n >= 200 (4 rows)"));
        assert!(text.contains("value std across runs\n  DP:     0.00\n  greedy: 1.89\n"));
    }

    #[test]
    fn report_is_written_under_new_directories() {
        let dir = tempdir().unwrap();
        let a = write_run(dir.path(), "a.csv", vec![record(10, 50, 1), record(20, 80, 2)]);
        let text = format_analysis(&analyze(&load(&[a]).unwrap(), 15).unwrap());
        let out = dir.path().join("results").join("analysis_results.txt");
        write_report(&out, &text).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), text);
    }

    #[test]
    fn empty_range_prints_na() {
        let dir = tempdir().unwrap();
        let a = write_run(dir.path(), "a.csv", vec![record(10, 50, 1)]);
        let analysis = analyze(&load(&[a]).unwrap(), 15000).unwrap();
        assert_eq!(analysis.at_or_above.rows, 0);
        assert_eq!(analysis.at_or_above.mean, None);
        assert_eq!(analysis.dp_growth, None);
        assert_eq!(analysis.value_std, (None, None));
        assert!(format_analysis(&analysis).contains("n/a"));
    }

    #[test]
    fn inflections_rank_by_jump_size() {
        let per_n = [(1, 90.0), (2, 91.0), (3, 80.0), (4, 85.0)];
        assert_eq!(inflections(&per_n, 2), vec![3, 4]);
        assert!(inflections(&per_n[..1], 3).is_empty());
    }
}
