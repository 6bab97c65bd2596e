//! Non-recursive listing of a source folder.

use std::fs;
use std::path::{Path, PathBuf};

use hue_sort_core::SortError;
use tracing::debug;

use crate::loader::is_image_file;

/// Regular files found directly inside a folder, split by whether they look
/// like images. Both lists are sorted by file name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    pub images: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl ScanResult {
    /// Number of regular files encountered.
    pub fn total(&self) -> usize {
        self.images.len() + self.skipped.len()
    }
}

/// Lists the regular files directly inside `src`. Subdirectories are not
/// entered and do not count toward the total.
pub fn scan_folder(src: &Path) -> Result<ScanResult, SortError> {
    let io_err = |e: std::io::Error| SortError::Io(format!("cannot read {}: {e}", src.display()));

    let mut files: Vec<PathBuf> = fs::read_dir(src)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()).map_err(io_err))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|p| p.is_file())
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let (images, skipped): (Vec<PathBuf>, Vec<PathBuf>) =
        files.into_iter().partition(|p| is_image_file(p));
    for path in &skipped {
        debug!(file = %path.display(), "skip (not an image)");
    }

    Ok(ScanResult { images, skipped })
}
