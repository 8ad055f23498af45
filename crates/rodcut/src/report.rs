//! Fixed-width result tables and the sink seam.
//!
//! Layout (one row per record):
//! ```text
//!       n        vDP          tDP    vGreedy      tGreedy          %
//! --------------------------------------------------------
//!    1000       1234     0.001234       1200     0.000012     97.24%
//! ```

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::harness::{BenchmarkRecord, BenchmarkReport};

/// Width of the dashed separator under the header.
pub const SEPARATOR_WIDTH: usize = 56;

/// Failure to hand a report to its destination.
#[derive(Debug)]
pub enum SinkError {
    Io { path: PathBuf, source: io::Error },
    Encode { reason: String },
}

impl SinkError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "writing {}: {source}", path.display()),
            Self::Encode { reason } => write!(f, "encoding results: {reason}"),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode { .. } => None,
        }
    }
}

/// Destination for a finished sweep.
pub trait ResultSink {
    fn publish(&mut self, report: &BenchmarkReport) -> Result<(), SinkError>;
}

pub fn header() -> String {
    format!(
        "{:>7} {:>10} {:>12} {:>10} {:>12} {:>10}",
        "n", "vDP", "tDP", "vGreedy", "tGreedy", "%"
    )
}

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

pub fn format_row(r: &BenchmarkRecord) -> String {
    format!(
        "{:>7} {:>10} {:>12.6} {:>10} {:>12.6} {:>9.2}%",
        r.n,
        r.optimal_value,
        r.optimal_elapsed.as_secs_f64(),
        r.greedy_value,
        r.greedy_elapsed.as_secs_f64(),
        r.ratio
    )
}

/// Header, separator and one line per record, each newline-terminated.
pub fn render_table(records: &[BenchmarkRecord]) -> String {
    let mut out = String::new();
    out.push_str(&header());
    out.push('\n');
    out.push_str(&separator());
    out.push('\n');
    for r in records {
        out.push_str(&format_row(r));
        out.push('\n');
    }
    out
}

pub fn summary_line(mean_ratio: Option<f64>) -> String {
    match mean_ratio {
        Some(mean) => format!("Mean ratio: {mean:.2}%"),
        None => "Mean ratio: n/a".to_string(),
    }
}

/// Writes the rendered table (optionally followed by the summary) to any writer.
pub struct TableSink<W: Write> {
    out: W,
    label: PathBuf,
    with_summary: bool,
}

impl<W: Write> TableSink<W> {
    /// `label` names the destination in errors.
    pub fn new(out: W, label: impl AsRef<Path>) -> Self {
        Self {
            out,
            label: label.as_ref().to_path_buf(),
            with_summary: false,
        }
    }

    pub fn with_summary(mut self) -> Self {
        self.with_summary = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for TableSink<W> {
    fn publish(&mut self, report: &BenchmarkReport) -> Result<(), SinkError> {
        let mut text = render_table(&report.records);
        if self.with_summary {
            text.push('\n');
            text.push_str(&summary_line(report.mean_ratio));
            text.push('\n');
        }
        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| SinkError::io(&self.label, e))
    }
}
