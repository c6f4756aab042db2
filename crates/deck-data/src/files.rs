//! Snapshot file selection
//!
//! Snapshot files are named `<prefix><%Y-%m-%d_%H-%M-%S>.csv`; "latest"
//! is decided by filesystem mtime, the capture timestamp comes from the
//! filename itself.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::DataError;

/// Filename timestamp format written by the poller
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Find the most-recently-modified file in `dir` whose name starts with
/// `prefix` and ends with `suffix`
pub fn latest_file(dir: &Path, prefix: &str, suffix: &str) -> Result<PathBuf, DataError> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.starts_with(prefix) || !name.ends_with(suffix) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        match &latest {
            Some((best, _)) if *best >= modified => {}
            _ => latest = Some((modified, entry.path())),
        }
    }

    latest.map(|(_, path)| path).ok_or_else(|| DataError::NoSnapshotFiles {
        dir: dir.display().to_string(),
        pattern: format!("{prefix}*{suffix}"),
    })
}

/// Extract a `%Y-%m-%d_%H-%M-%S` timestamp embedded in a filename
///
/// Returns `None` when no such substring parses, matching files written
/// by hand without a timestamp.
pub fn timestamp_from_filename(name: &str) -> Option<NaiveDateTime> {
    // The pattern is 19 bytes long and all ASCII, so scan fixed windows.
    let bytes = name.as_bytes();
    if bytes.len() < 19 {
        return None;
    }
    for start in 0..=bytes.len() - 19 {
        if let Ok(window) = std::str::from_utf8(&bytes[start..start + 19]) {
            if let Ok(ts) = NaiveDateTime::parse_from_str(window, FILE_TIMESTAMP_FORMAT) {
                return Some(ts);
            }
        }
    }
    None
}

/// Capture timestamp of a snapshot file, from its filename
pub fn capture_timestamp(path: &Path) -> Option<NaiveDateTime> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(timestamp_from_filename)
}
