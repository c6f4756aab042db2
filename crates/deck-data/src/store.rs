//! Snapshot store used by the poller
//!
//! Writes timestamped CSV snapshots under `<data_dir>/realtime` and
//! `<data_dir>/historical`, keeping only the newest realtime file, plus
//! the `top_10_coins.txt` id list the historical fetch works from.

use chrono::NaiveDateTime;
use deck_core::snapshot::{HistoricalRow, RealtimeRow};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::files::FILE_TIMESTAMP_FORMAT;
use crate::sources::csv_source::{HISTORICAL_DIR, HISTORICAL_PREFIX, REALTIME_DIR, REALTIME_PREFIX};
use crate::DataError;

pub const TOP10_FILENAME: &str = "top_10_coins.txt";

/// Flat-file store for polled snapshots
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn realtime_dir(&self) -> PathBuf {
        self.data_dir.join(REALTIME_DIR)
    }

    pub fn historical_dir(&self) -> PathBuf {
        self.data_dir.join(HISTORICAL_DIR)
    }

    /// Write a realtime snapshot, replacing any previous ones
    ///
    /// Rows are stamped with the capture date/time columns before writing
    /// so the CSV matches what the dashboard expects.
    pub fn write_realtime(
        &self,
        mut rows: Vec<RealtimeRow>,
        captured_at: NaiveDateTime,
    ) -> Result<PathBuf, DataError> {
        let dir = self.realtime_dir();
        std::fs::create_dir_all(&dir)?;
        self.prune_realtime()?;

        let date = captured_at.format("%Y-%m-%d").to_string();
        let time = captured_at.format("%H:%M:%S").to_string();
        for row in &mut rows {
            row.date = date.clone();
            row.time = time.clone();
        }

        let filename = format!(
            "{REALTIME_PREFIX}{}.csv",
            captured_at.format(FILE_TIMESTAMP_FORMAT)
        );
        let path = dir.join(filename);
        write_csv(&path, &rows)?;
        info!(path = %path.display(), rows = rows.len(), "wrote realtime snapshot");
        Ok(path)
    }

    /// Write the historical time series file
    pub fn write_historical(
        &self,
        rows: &[HistoricalRow],
        captured_at: NaiveDateTime,
    ) -> Result<PathBuf, DataError> {
        let dir = self.historical_dir();
        std::fs::create_dir_all(&dir)?;

        let filename = format!(
            "{HISTORICAL_PREFIX}{}.csv",
            captured_at.format(FILE_TIMESTAMP_FORMAT)
        );
        let path = dir.join(filename);
        write_csv(&path, rows)?;
        info!(path = %path.display(), rows = rows.len(), "wrote historical series");
        Ok(path)
    }

    /// Write the top-10 coin id list consumed by the historical fetch
    pub fn write_top10(&self, ids: &[String]) -> Result<PathBuf, DataError> {
        let dir = self.historical_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(TOP10_FILENAME);
        let mut file = std::fs::File::create(&path)?;
        for id in ids {
            writeln!(file, "{id}")?;
        }
        Ok(path)
    }

    /// Read the top-10 coin id list back, skipping blank lines
    pub fn read_top10(&self) -> Result<Vec<String>, DataError> {
        let path = self.historical_dir().join(TOP10_FILENAME);
        let contents = std::fs::read_to_string(path)?;
        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Delete previous realtime snapshot files
    pub fn prune_realtime(&self) -> Result<(), DataError> {
        let dir = self.realtime_dir();
        if !dir.exists() {
            return Ok(());
        }
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(REALTIME_PREFIX) && name.ends_with(".csv") {
                if let Err(error) = std::fs::remove_file(entry.path()) {
                    warn!(path = %entry.path().display(), %error, "failed to delete old snapshot");
                }
            }
        }
        Ok(())
    }
}

fn write_csv<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
