//! File-backed result sinks.
//!
//! A finished sweep lands in the data directory as `results.txt` (the same
//! fixed-width table the console shows), `results.csv` (one row per size, for
//! `rodcut analyze`) and the `results.provenance.json` sidecar.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;
use rodcut::prelude::*;
use serde_json::Value;

use crate::provenance::{self, Payload};

pub const TABLE_FILE: &str = "results.txt";
pub const CSV_FILE: &str = "results.csv";

/// `<directory of the executable>/../data`.
pub fn default_data_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating the running executable")?;
    let bin_dir = exe
        .parent()
        .context("executable path has no parent directory")?;
    Ok(bin_dir.join("..").join("data"))
}

/// Fixed-width table written to a file, truncating any previous run.
pub struct TextFileSink {
    path: PathBuf,
}

impl TextFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultSink for TextFileSink {
    fn publish(&mut self, report: &BenchmarkReport) -> Result<(), SinkError> {
        let file = File::create(&self.path).map_err(|e| SinkError::io(&self.path, e))?;
        TableSink::new(BufWriter::new(file), &self.path).publish(report)
    }
}

/// Columns: `n, v_dp, t_dp, v_greedy, t_greedy, ratio` (times in seconds).
pub fn records_frame(records: &[BenchmarkRecord]) -> PolarsResult<DataFrame> {
    let n: Vec<i64> = records.iter().map(|r| to_i64(r.n as u64)).collect();
    let v_dp: Vec<i64> = records.iter().map(|r| to_i64(r.optimal_value)).collect();
    let t_dp: Vec<f64> = records
        .iter()
        .map(|r| r.optimal_elapsed.as_secs_f64())
        .collect();
    let v_greedy: Vec<i64> = records.iter().map(|r| to_i64(r.greedy_value)).collect();
    let t_greedy: Vec<f64> = records
        .iter()
        .map(|r| r.greedy_elapsed.as_secs_f64())
        .collect();
    let ratio: Vec<f64> = records.iter().map(|r| r.ratio).collect();
    df!(
        "n" => n,
        "v_dp" => v_dp,
        "t_dp" => t_dp,
        "v_greedy" => v_greedy,
        "t_greedy" => t_greedy,
        "ratio" => ratio
    )
}

fn to_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultSink for CsvSink {
    fn publish(&mut self, report: &BenchmarkReport) -> Result<(), SinkError> {
        let encode = |e: PolarsError| SinkError::Encode {
            reason: e.to_string(),
        };
        let mut df = records_frame(&report.records).map_err(encode)?;
        let mut file = File::create(&self.path).map_err(|e| SinkError::io(&self.path, e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(encode)
    }
}

/// Write table, CSV and sidecar under `dir`. Failures are logged and
/// swallowed; the returned list holds the files that were written.
pub fn persist(report: &BenchmarkReport, dir: &Path, seed: u64, params: Value) -> Vec<PathBuf> {
    if let Err(err) = fs::create_dir_all(dir) {
        tracing::debug!(dir = %dir.display(), %err, "results not persisted");
        return Vec::new();
    }

    let table_path = dir.join(TABLE_FILE);
    let csv_path = dir.join(CSV_FILE);
    let mut written = Vec::new();
    let mut sinks: Vec<(PathBuf, Box<dyn ResultSink>)> = vec![
        (table_path.clone(), Box::new(TextFileSink::new(&table_path))),
        (csv_path.clone(), Box::new(CsvSink::new(&csv_path))),
    ];
    for (path, sink) in sinks.iter_mut() {
        match sink.publish(report) {
            Ok(()) => written.push(path.clone()),
            Err(err) => tracing::debug!(%err, "result file skipped"),
        }
    }

    let Some((primary, rest)) = written.split_first() else {
        return written;
    };
    let payload = Payload::new(params)
        .with_seed(seed)
        .with_outputs(rest.iter().cloned());
    match provenance::write_sidecar(primary, payload) {
        Ok(sidecar) => written.push(sidecar),
        Err(err) => tracing::debug!(err = %format!("{err:#}"), "provenance sidecar skipped"),
    }
    written
}
