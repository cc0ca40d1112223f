use crate::file::TMP_MARKER;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

/// Temp files younger than this may belong to a save in progress.
const STALE_AFTER: Duration = Duration::from_secs(300);

/// Outcome of [`purge_stale_temp_files`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeSummary {
    pub removed: usize,
    pub failed: usize,
}

/// Removes temp files left in `dir` by interrupted saves.
///
/// Only files directly inside `dir`, carrying the temp marker and older than five minutes
/// are removed. A missing directory is not an error.
pub fn purge_stale_temp_files(dir: impl AsRef<Path>) -> PurgeSummary {
    let summary = remove_stale(dir.as_ref(), SystemTime::now(), STALE_AFTER);
    if summary.removed > 0 || summary.failed > 0 {
        info!(removed = summary.removed, failed = summary.failed, "Cleaned up temporary files");
    }
    summary
}

fn remove_stale(dir: &Path, now: SystemTime, threshold: Duration) -> PurgeSummary {
    let mut summary = PurgeSummary::default();

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .flatten()
        .filter(|entry| is_tmp(entry) && is_stale(entry, now, threshold))
        .for_each(|entry| match std::fs::remove_file(entry.path()) {
            Ok(()) => summary.removed += 1,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Failed to remove temp file");
                summary.failed += 1;
            },
        });

    summary
}

fn is_tmp(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER))
}

fn is_stale(entry: &DirEntry, now: SystemTime, threshold: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > threshold)
}
