//! Data layer for the coindeck dashboard
//!
//! CSV snapshot loading, latest-file selection, the CoinGecko client
//! and the snapshot store used by the poller.

pub mod coingecko;
pub mod files;
pub mod sources;
pub mod store;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use coingecko::CoinGeckoClient;
pub use sources::CsvSnapshotProvider;
pub use store::SnapshotStore;

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("no snapshot files matching '{pattern}' in {dir}")]
    NoSnapshotFiles { dir: String, pattern: String },

    #[error("join error: {0}")]
    Join(#[from] JoinError),

    #[error("other error: {0}")]
    Other(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
