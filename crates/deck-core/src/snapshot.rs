//! Typed snapshot tables and the aggregations the slide catalog needs
//!
//! Both tables have a fixed schema: the realtime snapshot is one row per
//! coin, the historical series one row per (coin, timestamp).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Metric plotted by a parametric time-series slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Price,
    MarketCap,
    Volume,
}

impl Metric {
    /// Display label used in slide subtitles and axis labels
    pub fn label(self) -> &'static str {
        match self {
            Metric::Price => "Price",
            Metric::MarketCap => "Market Cap",
            Metric::Volume => "Volume",
        }
    }

    /// Extract this metric from a historical row
    pub fn value(self, row: &HistoricalRow) -> f64 {
        match self {
            Metric::Price => row.price,
            Metric::MarketCap => row.market_cap,
            Metric::Volume => row.total_volume,
        }
    }
}

/// One row of the realtime market snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeRow {
    pub id: String,
    pub symbol: String,
    /// Capture date, as written into the CSV by the poller
    #[serde(default)]
    pub date: String,
    /// Capture time of day, as written into the CSV by the poller
    #[serde(default)]
    pub time: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub price_change_24h: f64,
    pub price_change_percentage_24h: f64,
    pub ath: f64,
    pub atl: f64,
}

/// One row of the historical time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRow {
    pub id: String,
    #[serde(with = "csv_timestamp")]
    pub timestamp: NaiveDateTime,
    pub price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub ath: f64,
}

/// Serde format for CSV timestamps ("2025-08-01 14:30:00")
pub mod csv_timestamp {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

/// A single-point-in-time table of per-coin metrics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RealtimeSnapshot {
    pub rows: Vec<RealtimeRow>,
    /// Capture timestamp parsed from the snapshot filename
    pub captured_at: Option<NaiveDateTime>,
}

impl RealtimeSnapshot {
    pub fn new(rows: Vec<RealtimeRow>, captured_at: Option<NaiveDateTime>) -> Self {
        Self { rows, captured_at }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a coin by id
    pub fn row(&self, id: &str) -> Option<&RealtimeRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Sum of `market_cap` over all coins
    pub fn total_market_cap(&self) -> f64 {
        self.rows.iter().map(|r| r.market_cap).sum()
    }

    /// Sum of `total_volume` over all coins
    pub fn total_volume(&self) -> f64 {
        self.rows.iter().map(|r| r.total_volume).sum()
    }

    /// Market-cap share of one coin as a percentage of the whole table
    pub fn dominance(&self, id: &str) -> Option<f64> {
        let total = self.total_market_cap();
        if total == 0.0 {
            return None;
        }
        self.row(id).map(|r| r.market_cap / total * 100.0)
    }

    /// Top `n` rows by market cap, descending
    pub fn top_by_market_cap(&self, n: usize) -> Vec<&RealtimeRow> {
        self.top_by(n, |r| r.market_cap)
    }

    /// Top `n` rows by traded volume, descending
    pub fn top_by_volume(&self, n: usize) -> Vec<&RealtimeRow> {
        self.top_by(n, |r| r.total_volume)
    }

    fn top_by(&self, n: usize, key: impl Fn(&RealtimeRow) -> f64) -> Vec<&RealtimeRow> {
        let mut sorted: Vec<&RealtimeRow> = self.rows.iter().collect();
        sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(std::cmp::Ordering::Equal));
        sorted.truncate(n);
        sorted
    }
}

/// A multi-timestamp table of per-coin metrics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoricalSeries {
    pub rows: Vec<HistoricalRow>,
    /// Capture timestamp parsed from the series filename
    pub captured_at: Option<NaiveDateTime>,
}

impl HistoricalSeries {
    pub fn new(rows: Vec<HistoricalRow>, captured_at: Option<NaiveDateTime>) -> Self {
        Self { rows, captured_at }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct coin ids in first-seen order (drives the selector dropdown)
    pub fn entities(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.iter().any(|id| id == &row.id) {
                seen.push(row.id.clone());
            }
        }
        seen
    }

    /// All rows for one coin, in file order
    pub fn rows_for(&self, id: &str) -> Vec<&HistoricalRow> {
        self.rows.iter().filter(|r| r.id == id).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.iter().any(|r| r.id == id)
    }

    /// The last recorded row for each coin
    pub fn last_per_entity(&self) -> Vec<&HistoricalRow> {
        self.entities()
            .iter()
            .filter_map(|id| self.rows.iter().rfind(|r| &r.id == id))
            .collect()
    }

    /// Mean of one metric over a coin's rows
    pub fn mean_metric(&self, id: &str, metric: Metric) -> Option<f64> {
        let rows = self.rows_for(id);
        if rows.is_empty() {
            return None;
        }
        Some(rows.iter().map(|r| metric.value(r)).sum::<f64>() / rows.len() as f64)
    }

    /// Pivot prices into per-coin columns aligned on sorted distinct
    /// timestamps; missing observations become NaN
    pub fn price_pivot(&self) -> (Vec<String>, Vec<Vec<f64>>) {
        let entities = self.entities();
        let mut timestamps: Vec<NaiveDateTime> = self.rows.iter().map(|r| r.timestamp).collect();
        timestamps.sort();
        timestamps.dedup();

        let columns = entities
            .iter()
            .map(|id| {
                timestamps
                    .iter()
                    .map(|ts| {
                        self.rows
                            .iter()
                            .find(|r| &r.id == id && r.timestamp == *ts)
                            .map_or(f64::NAN, |r| r.price)
                    })
                    .collect()
            })
            .collect();

        (entities, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn realtime_row(id: &str, price: f64, cap: f64, volume: f64) -> RealtimeRow {
        RealtimeRow {
            id: id.to_string(),
            symbol: id[..3.min(id.len())].to_string(),
            date: String::new(),
            time: String::new(),
            current_price: price,
            market_cap: cap,
            total_volume: volume,
            high_24h: price * 1.1,
            low_24h: price * 0.9,
            price_change_24h: 0.0,
            price_change_percentage_24h: 0.0,
            ath: price * 2.0,
            atl: price * 0.1,
        }
    }

    fn historical_row(id: &str, ts: &str, price: f64) -> HistoricalRow {
        HistoricalRow {
            id: id.to_string(),
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            price,
            market_cap: price * 1000.0,
            total_volume: price * 100.0,
            ath: price * 2.0,
        }
    }

    fn sample_snapshot() -> RealtimeSnapshot {
        RealtimeSnapshot::new(
            vec![
                realtime_row("bitcoin", 60_000.0, 1_200_000.0, 30_000.0),
                realtime_row("ethereum", 3_000.0, 400_000.0, 20_000.0),
                realtime_row("solana", 150.0, 80_000.0, 50_000.0),
            ],
            None,
        )
    }

    #[test]
    fn test_totals() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.total_market_cap(), 1_680_000.0);
        assert_eq!(snapshot.total_volume(), 100_000.0);
    }

    #[test]
    fn test_dominance() {
        let snapshot = sample_snapshot();
        let dominance = snapshot.dominance("bitcoin").unwrap();
        assert!((dominance - 1_200_000.0 / 1_680_000.0 * 100.0).abs() < 1e-9);
        assert!(snapshot.dominance("dogecoin").is_none());
    }

    #[test]
    fn test_top_by_volume_ordering() {
        let snapshot = sample_snapshot();
        let top: Vec<&str> = snapshot.top_by_volume(2).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(top, vec!["solana", "bitcoin"]);
    }

    #[test]
    fn test_entities_first_seen_order() {
        let series = HistoricalSeries::new(
            vec![
                historical_row("bitcoin", "2025-08-01 00:00:00", 60_000.0),
                historical_row("ethereum", "2025-08-01 00:00:00", 3_000.0),
                historical_row("bitcoin", "2025-08-02 00:00:00", 61_000.0),
            ],
            None,
        );
        assert_eq!(series.entities(), vec!["bitcoin", "ethereum"]);
        assert_eq!(series.rows_for("bitcoin").len(), 2);
        assert!(series.rows_for("dogecoin").is_empty());
    }

    #[test]
    fn test_last_per_entity() {
        let series = HistoricalSeries::new(
            vec![
                historical_row("bitcoin", "2025-08-01 00:00:00", 60_000.0),
                historical_row("bitcoin", "2025-08-02 00:00:00", 61_000.0),
                historical_row("ethereum", "2025-08-02 00:00:00", 3_100.0),
            ],
            None,
        );
        let last = series.last_per_entity();
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].price, 61_000.0);
        assert_eq!(last[1].price, 3_100.0);
    }

    #[test]
    fn test_price_pivot_alignment() {
        let series = HistoricalSeries::new(
            vec![
                historical_row("bitcoin", "2025-08-01 00:00:00", 60_000.0),
                historical_row("bitcoin", "2025-08-02 00:00:00", 61_000.0),
                historical_row("ethereum", "2025-08-02 00:00:00", 3_100.0),
            ],
            None,
        );
        let (entities, columns) = series.price_pivot();
        assert_eq!(entities, vec!["bitcoin", "ethereum"]);
        assert_eq!(columns[0], vec![60_000.0, 61_000.0]);
        assert!(columns[1][0].is_nan());
        assert_eq!(columns[1][1], 3_100.0);
    }

    #[test]
    fn test_metric_accessors() {
        let row = historical_row("bitcoin", "2025-08-01 00:00:00", 2.0);
        assert_eq!(Metric::Price.value(&row), 2.0);
        assert_eq!(Metric::MarketCap.value(&row), 2_000.0);
        assert_eq!(Metric::Volume.value(&row), 200.0);
        assert_eq!(Metric::MarketCap.label(), "Market Cap");
    }
}
