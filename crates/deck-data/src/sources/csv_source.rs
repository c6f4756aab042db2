//! CSV snapshot provider
//!
//! Reads the newest snapshot files the poller has written under a data
//! directory and hands them to the dashboard as typed tables.

use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::ReaderBuilder;
use deck_core::snapshot::{HistoricalRow, HistoricalSeries, RealtimeRow, RealtimeSnapshot};
use deck_core::SnapshotProvider;
use tracing::info;

use crate::files::{capture_timestamp, latest_file};
use crate::DataError;

/// Directory and filename layout shared with the poller
pub const REALTIME_DIR: &str = "realtime";
pub const HISTORICAL_DIR: &str = "historical";
pub const REALTIME_PREFIX: &str = "crypto_data_";
pub const HISTORICAL_PREFIX: &str = "top_10_crypto_";

/// Snapshot provider over a directory of timestamped CSV files
pub struct CsvSnapshotProvider {
    data_dir: PathBuf,
    source_name: String,
}

impl CsvSnapshotProvider {
    /// Create a provider rooted at `data_dir` (the directory holding the
    /// `realtime/` and `historical/` subdirectories)
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let source_name = data_dir.display().to_string();
        Self { data_dir, source_name }
    }

    fn realtime_dir(&self) -> PathBuf {
        self.data_dir.join(REALTIME_DIR)
    }

    fn historical_dir(&self) -> PathBuf {
        self.data_dir.join(HISTORICAL_DIR)
    }

    fn load_realtime(path: &Path) -> Result<RealtimeSnapshot, DataError> {
        let file = std::fs::File::open(path)?;
        let rows = parse_realtime(file)?;
        Ok(RealtimeSnapshot::new(rows, capture_timestamp(path)))
    }

    fn load_historical(path: &Path) -> Result<HistoricalSeries, DataError> {
        let file = std::fs::File::open(path)?;
        let rows = parse_historical(file)?;
        Ok(HistoricalSeries::new(rows, capture_timestamp(path)))
    }
}

#[async_trait]
impl SnapshotProvider for CsvSnapshotProvider {
    async fn latest_realtime(&self) -> anyhow::Result<RealtimeSnapshot> {
        let dir = self.realtime_dir();
        let snapshot = tokio::task::spawn_blocking(move || {
            let path = latest_file(&dir, REALTIME_PREFIX, ".csv")?;
            info!(path = %path.display(), "loading realtime snapshot");
            Self::load_realtime(&path)
        })
        .await??;
        Ok(snapshot)
    }

    async fn latest_historical(&self) -> anyhow::Result<HistoricalSeries> {
        let dir = self.historical_dir();
        let series = tokio::task::spawn_blocking(move || {
            let path = latest_file(&dir, HISTORICAL_PREFIX, ".csv")?;
            info!(path = %path.display(), "loading historical series");
            Self::load_historical(&path)
        })
        .await??;
        Ok(series)
    }

    fn source_name(&self) -> &str {
        &self.source_name
    }
}

/// Parse realtime snapshot rows from CSV
pub fn parse_realtime<R: Read>(reader: R) -> Result<Vec<RealtimeRow>, DataError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Parse historical series rows from CSV
pub fn parse_historical<R: Read>(reader: R) -> Result<Vec<HistoricalRow>, DataError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}
