//! Deciding where each image goes and moving or copying it there.
//!
//! Placement is split into a pure planning step, which picks a collision-free
//! destination for every file, and an execution step that touches the file
//! system. Dry runs stop after planning.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hue_sort_core::{label, Classification, ClassifierConfig, ColorLabel};
use tracing::{error, info};

use crate::report::{LogRecord, Status};

/// Folder used for decode failures when `separate_errors` is set.
pub const UNREADABLE_FOLDER: &str = "unreadable";

/// Destination folder for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Color(ColorLabel),
    Unreadable,
}

impl Bucket {
    /// Picks the bucket for a classification result.
    pub fn for_result(result: &Classification, separate_errors: bool) -> Self {
        if separate_errors && result.reason.is_error() {
            Bucket::Unreadable
        } else {
            Bucket::Color(label(result.hue, &result.reason))
        }
    }

    pub fn folder_name(self) -> &'static str {
        match self {
            Bucket::Color(l) => l.as_str(),
            Bucket::Unreadable => UNREADABLE_FOLDER,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}

/// Whether sorted files leave the source folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferMode {
    #[default]
    Move,
    Copy,
}

/// Everything a sorting run needs.
#[derive(Debug, Clone)]
pub struct SortOptions {
    pub src: PathBuf,
    pub dest: PathBuf,
    pub mode: TransferMode,
    /// Plan and log only; leave every file where it is.
    pub dry_run: bool,
    /// Route decode failures to `unreadable/` instead of `neutral/`.
    pub separate_errors: bool,
    pub classifier: ClassifierConfig,
}

impl SortOptions {
    /// Options for sorting `src` into `<src>/sorted_by_color` as a dry run.
    pub fn new(src: impl Into<PathBuf>) -> Self {
        let src = src.into();
        let dest = default_dest(&src);
        Self {
            src,
            dest,
            mode: TransferMode::Move,
            dry_run: true,
            separate_errors: false,
            classifier: ClassifierConfig::default(),
        }
    }
}

/// `<src>/sorted_by_color`.
pub fn default_dest(src: &Path) -> PathBuf {
    src.join("sorted_by_color")
}

/// A planned placement for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub source: PathBuf,
    pub bucket: Bucket,
    pub destination: PathBuf,
    pub classification: Classification,
}

/// Returns `dir/file_name`, or `dir/<stem>_<n>.<ext>` with the smallest
/// `n >= 1` that neither exists on disk nor is in `claimed`.
pub fn unique_destination(dir: &Path, file_name: &str, claimed: &HashSet<PathBuf>) -> PathBuf {
    let taken = |p: &Path| p.exists() || claimed.contains(p);
    let candidate = dir.join(file_name);
    if !taken(candidate.as_path()) {
        return candidate;
    }

    let as_path = Path::new(file_name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let ext = as_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|i| dir.join(format!("{stem}_{i}{ext}")))
        .find(|p| !taken(p.as_path()))
        .unwrap_or(candidate)
}

/// Assigns each image a bucket and a unique destination under `options.dest`.
///
/// `sources` and `results` are paired by position.
pub fn plan_placements(
    sources: &[PathBuf],
    results: Vec<Classification>,
    options: &SortOptions,
) -> Vec<Placement> {
    let mut claimed = HashSet::new();
    sources
        .iter()
        .zip(results)
        .map(|(source, classification)| {
            let bucket = Bucket::for_result(&classification, options.separate_errors);
            let dir = options.dest.join(bucket.folder_name());
            let file_name = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let destination = unique_destination(&dir, &file_name, &claimed);
            claimed.insert(destination.clone());
            Placement {
                source: source.clone(),
                bucket,
                destination,
                classification,
            }
        })
        .collect()
}

/// Moves or copies `source` to `destination`, creating the parent folder.
///
/// A move first tries a rename and falls back to copy-then-delete, which
/// covers destinations on another file system.
pub fn transfer(source: &Path, destination: &Path, mode: TransferMode) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    match mode {
        TransferMode::Copy => fs::copy(source, destination).map(|_| ()),
        TransferMode::Move => fs::rename(source, destination).or_else(|_| {
            fs::copy(source, destination)?;
            fs::remove_file(source)
        }),
    }
}

/// Result of carrying out a plan.
#[derive(Debug, Default)]
pub struct Execution {
    pub records: Vec<LogRecord>,
    pub tally: HashMap<Bucket, usize>,
    pub errors: usize,
}

fn action_name(mode: TransferMode, dry_run: bool) -> &'static str {
    match (dry_run, mode) {
        (true, TransferMode::Move) => "DRY-RUN move",
        (true, TransferMode::Copy) => "DRY-RUN copy",
        (false, TransferMode::Move) => "move",
        (false, TransferMode::Copy) => "copy",
    }
}

/// Applies each placement in order (or only records it, in a dry run).
///
/// A failed move or copy is logged and recorded with status `error`; the
/// remaining placements still run.
pub fn execute(plan: &[Placement], options: &SortOptions) -> Execution {
    let action = action_name(options.mode, options.dry_run);
    let mut out = Execution::default();

    for p in plan {
        let file = p.source.file_name().unwrap_or_default().to_string_lossy();
        let hue = p
            .classification
            .hue
            .map(|h| format!("{h}"))
            .unwrap_or_else(|| "N/A".to_string());
        info!(
            "[{action}] {file} -> {} (hue={hue}, reason={})",
            p.bucket, p.classification.reason
        );

        let outcome = if options.dry_run {
            Ok(Status::DryRun)
        } else {
            transfer(&p.source, &p.destination, options.mode).map(|()| Status::Ok)
        };

        match outcome {
            Ok(status) => {
                *out.tally.entry(p.bucket).or_insert(0) += 1;
                out.records.push(LogRecord {
                    source: p.source.display().to_string(),
                    assigned_color: p.bucket.to_string(),
                    destination: p.destination.display().to_string(),
                    status,
                    reason: p.classification.reason.to_string(),
                });
            }
            Err(e) => {
                error!(file = %p.source.display(), error = %e, "failed to {action} file");
                out.errors += 1;
                out.records.push(LogRecord {
                    source: p.source.display().to_string(),
                    assigned_color: p.bucket.to_string(),
                    destination: String::new(),
                    status: Status::Error,
                    reason: e.to_string(),
                });
            }
        }
    }

    out
}
