//! Snapshot provider trait implemented by the data layer

use crate::snapshot::{HistoricalSeries, RealtimeSnapshot};

/// Trait for snapshot providers
///
/// "Latest" always means the most recently produced snapshot the
/// provider can see; how it finds that (file mtimes, an API call) is
/// the provider's business.
#[async_trait::async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Fetch the latest realtime per-coin snapshot
    async fn latest_realtime(&self) -> anyhow::Result<RealtimeSnapshot>;

    /// Fetch the latest historical time series
    async fn latest_historical(&self) -> anyhow::Result<HistoricalSeries>;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
