#![deny(unsafe_code)]
//! File-system side of hue-sort: loading images and filing them by color.
//!
//! This crate sits between `hue-sort-core` (pure classification) and the CLI.
//! It decodes and downsamples images, classifies batches in parallel, plans
//! collision-free destinations, moves or copies files, and writes the sort log.

pub mod loader;
pub mod organize;
pub mod report;
pub mod scan;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use hue_sort_core::{classify, Classification, ClassifierConfig, SortError};
use rayon::prelude::*;
use tracing::{debug, info, warn};

pub use organize::{Bucket, SortOptions, TransferMode};
pub use report::{SortSummary, LOG_FILE_NAME};

/// Loads and classifies one image.
///
/// Never fails: an image that cannot be opened or decoded comes back as
/// `error_opening:<details>` with no hue, so callers can record it and move on.
pub fn analyze_path(path: &Path, config: &ClassifierConfig) -> Classification {
    let result = match loader::load_grid(path, config) {
        Ok(grid) => classify(&grid, config),
        Err(SortError::ImageLoad { message, .. }) => Classification::decode_failure(message),
        Err(other) => Classification::decode_failure(other),
    };
    debug!(file = %path.display(), hue = ?result.hue, reason = %result.reason, "analyzed");
    result
}

/// Classifies every path in parallel. Results keep the input order.
pub fn analyze_batch(paths: &[PathBuf], config: &ClassifierConfig) -> Vec<Classification> {
    paths
        .par_iter()
        .map(|path| analyze_path(path, config))
        .collect()
}

/// Sorts the images directly inside `options.src` into color folders under
/// `options.dest`, then writes `sort_log.csv` there.
///
/// The destination root is created even for a dry run, since the log lives
/// there. Per-file move/copy failures are counted, not returned; only an
/// invalid configuration, an unreadable source folder, or an uncreatable
/// destination root fail the run. A log that cannot be written is reported
/// with a warning and `log_path: None`.
pub fn sort_folder(options: &SortOptions) -> Result<SortSummary, SortError> {
    options.classifier.validate()?;

    let scan = scan::scan_folder(&options.src)?;
    info!(
        total = scan.total(),
        src = %options.src.display(),
        "found files (non-recursive)"
    );

    fs::create_dir_all(&options.dest).map_err(|e| {
        SortError::Io(format!("cannot create {}: {e}", options.dest.display()))
    })?;

    let results = analyze_batch(&scan.images, &options.classifier);
    let plan = organize::plan_placements(&scan.images, results, options);
    let execution = organize::execute(&plan, options);

    let log_path = options.dest.join(LOG_FILE_NAME);
    let log_path = match report::write_log(&log_path, &execution.records) {
        Ok(()) => Some(log_path),
        Err(e) => {
            warn!(error = %e, "failed to write sort log");
            None
        }
    };

    Ok(SortSummary {
        total: scan.total(),
        processed: execution.tally.values().sum(),
        skipped: scan.skipped.len(),
        errors: execution.errors,
        counts: report::ranked_counts(&execution.tally),
        dry_run: options.dry_run,
        log_path,
    })
}

/// Per-label tally of a batch of results, without touching the file system.
pub fn tally_labels(results: &[Classification], separate_errors: bool) -> HashMap<Bucket, usize> {
    results.iter().fold(HashMap::new(), |mut acc, r| {
        *acc.entry(Bucket::for_result(r, separate_errors)).or_insert(0) += 1;
        acc
    })
}
