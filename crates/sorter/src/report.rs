//! Sort log (CSV) and run summary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use hue_sort_core::SortError;
use serde::Serialize;

use crate::organize::Bucket;

/// File name of the log written into the destination root.
pub const LOG_FILE_NAME: &str = "sort_log.csv";

/// Outcome of placing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// The file was moved or copied.
    Ok,
    /// The placement was only planned.
    DryRun,
    /// The move or copy failed.
    Error,
}

/// One row of the sort log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub source: String,
    pub assigned_color: String,
    pub destination: String,
    pub status: Status,
    /// Classification reason, or the I/O error text when `status` is `error`.
    pub reason: String,
}

/// Writes `records` as CSV with a header row, replacing any existing file.
pub fn write_log(path: &Path, records: &[LogRecord]) -> Result<(), SortError> {
    let io_err = |e: csv::Error| SortError::Io(format!("cannot write {}: {e}", path.display()));
    let mut writer = csv::Writer::from_path(path).map_err(io_err)?;
    if records.is_empty() {
        writer
            .write_record(["source", "assigned_color", "destination", "status", "reason"])
            .map_err(io_err)?;
    }
    for record in records {
        writer.serialize(record).map_err(io_err)?;
    }
    writer
        .flush()
        .map_err(|e| SortError::Io(format!("cannot write {}: {e}", path.display())))
}

/// Number of files placed in one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub bucket: String,
    pub count: usize,
}

/// Totals for one sorting run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortSummary {
    /// Regular files found in the source folder.
    pub total: usize,
    /// Images placed (or planned, in a dry run).
    pub processed: usize,
    /// Non-image files left alone.
    pub skipped: usize,
    /// Files whose move or copy failed.
    pub errors: usize,
    /// Per-bucket counts, largest first.
    pub counts: Vec<BucketCount>,
    pub dry_run: bool,
    /// Where the log was written; `None` if writing it failed.
    pub log_path: Option<PathBuf>,
}

/// Orders bucket tallies by count descending, then by bucket order.
pub fn ranked_counts(tally: &HashMap<Bucket, usize>) -> Vec<BucketCount> {
    let mut entries: Vec<(Bucket, usize)> = tally.iter().map(|(b, n)| (*b, *n)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    entries
        .into_iter()
        .map(|(bucket, count)| BucketCount {
            bucket: bucket.to_string(),
            count,
        })
        .collect()
}
