//! CoinGecko REST client
//!
//! Two endpoints feed the snapshot store: `/coins/markets` for the
//! realtime table and `/coins/{id}/market_chart` for per-coin history.

use chrono::{DateTime, NaiveDateTime};
use deck_core::snapshot::{HistoricalRow, RealtimeRow};
use serde::Deserialize;
use tracing::debug;

use crate::DataError;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// HTTP client for the CoinGecko API
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

/// One row of the `/coins/markets` response; metrics can be null for
/// thinly traded coins
#[derive(Debug, Deserialize)]
struct MarketsRow {
    id: String,
    symbol: String,
    current_price: Option<f64>,
    market_cap: Option<f64>,
    total_volume: Option<f64>,
    high_24h: Option<f64>,
    low_24h: Option<f64>,
    price_change_24h: Option<f64>,
    price_change_percentage_24h: Option<f64>,
    ath: Option<f64>,
    atl: Option<f64>,
}

/// `/coins/{id}/market_chart` response: parallel `[timestamp_ms, value]`
/// point lists
#[derive(Debug, Deserialize)]
struct MarketChart {
    prices: Vec<[f64; 2]>,
    market_caps: Vec<[f64; 2]>,
    total_volumes: Vec<[f64; 2]>,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different base URL (tests, proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the market snapshot, ordered by market cap descending
    pub async fn markets(&self, per_page: usize, page: usize) -> Result<Vec<RealtimeRow>, DataError> {
        let url = format!("{}/coins/markets", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", "usd".to_string()),
                ("order", "market_cap_desc".to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataError::Api(format!(
                "CoinGecko /coins/markets returned {}",
                response.status()
            )));
        }

        let rows: Vec<MarketsRow> = response.json().await?;
        debug!(rows = rows.len(), "fetched market snapshot");

        Ok(rows
            .into_iter()
            .map(|row| RealtimeRow {
                id: row.id,
                symbol: row.symbol,
                // Stamped by the store when the snapshot is written
                date: String::new(),
                time: String::new(),
                current_price: row.current_price.unwrap_or(0.0),
                market_cap: row.market_cap.unwrap_or(0.0),
                total_volume: row.total_volume.unwrap_or(0.0),
                high_24h: row.high_24h.unwrap_or(0.0),
                low_24h: row.low_24h.unwrap_or(0.0),
                price_change_24h: row.price_change_24h.unwrap_or(0.0),
                price_change_percentage_24h: row.price_change_percentage_24h.unwrap_or(0.0),
                ath: row.ath.unwrap_or(0.0),
                atl: row.atl.unwrap_or(0.0),
            })
            .collect())
    }

    /// Fetch one coin's history over the last `days` days
    ///
    /// `ath` is not part of the chart endpoint, so the caller passes the
    /// value from the realtime snapshot.
    pub async fn market_chart(
        &self,
        id: &str,
        days: u32,
        ath: f64,
    ) -> Result<Vec<HistoricalRow>, DataError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .query(&[("vs_currency", "usd".to_string()), ("days", days.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataError::Api(format!(
                "CoinGecko market_chart for '{}' returned {}",
                id,
                response.status()
            )));
        }

        let chart: MarketChart = response.json().await?;
        debug!(id, points = chart.prices.len(), "fetched market chart");

        let rows = chart
            .prices
            .iter()
            .zip(chart.market_caps.iter())
            .zip(chart.total_volumes.iter())
            .filter_map(|((price, cap), volume)| {
                let timestamp = timestamp_from_millis(price[0] as i64)?;
                Some(HistoricalRow {
                    id: id.to_string(),
                    timestamp,
                    price: price[1],
                    market_cap: cap[1],
                    total_volume: volume[1],
                    ath,
                })
            })
            .collect();

        Ok(rows)
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

fn timestamp_from_millis(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_from_millis() {
        let ts = timestamp_from_millis(1_722_470_400_000).unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-08-01 00:00:00");
    }

    #[test]
    fn test_markets_row_nulls_default_to_zero() {
        let json = r#"[{"id":"bitcoin","symbol":"btc","current_price":60000.0,
            "market_cap":null,"total_volume":null,"high_24h":null,"low_24h":null,
            "price_change_24h":null,"price_change_percentage_24h":null,
            "ath":73000.0,"atl":67.0}]"#;
        let rows: Vec<MarketsRow> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].current_price, Some(60_000.0));
        assert!(rows[0].market_cap.is_none());
    }
}
