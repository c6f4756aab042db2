//! KPI ticker strip computed from the realtime snapshot

use deck_core::snapshot::RealtimeSnapshot;
use deck_core::DEFAULT_ENTITY;

/// Headline numbers shown in the ticker
#[derive(Debug, Clone, PartialEq)]
pub struct KpiStrip {
    pub total_market_cap: f64,
    pub total_volume: f64,
    pub btc_dominance: Option<f64>,
    pub btc_price: Option<f64>,
}

impl KpiStrip {
    pub fn from_snapshot(snapshot: &RealtimeSnapshot) -> Self {
        Self {
            total_market_cap: snapshot.total_market_cap(),
            total_volume: snapshot.total_volume(),
            btc_dominance: snapshot.dominance(DEFAULT_ENTITY),
            btc_price: snapshot.row(DEFAULT_ENTITY).map(|r| r.current_price),
        }
    }

    /// Ticker lines in display order
    pub fn ticker_items(&self) -> Vec<String> {
        let mut items = vec![
            format!("Total Market Cap: ${}", format_grouped(self.total_market_cap)),
            format!("Total Volume: ${}", format_grouped(self.total_volume)),
        ];
        if let Some(dominance) = self.btc_dominance {
            items.push(format!("BTC Dominance: {dominance:.2}%"));
        }
        if let Some(price) = self.btc_price {
            items.push(format!("BTC Price: ${}", format_grouped(price)));
        }
        items
    }
}

/// Format a value with thousands separators and no decimals
pub fn format_grouped(value: f64) -> String {
    let negative = value < 0.0;
    let mut digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = if grouped.is_empty() {
            tail
        } else {
            format!("{tail},{grouped}")
        };
    }
    grouped = if grouped.is_empty() {
        digits
    } else {
        format!("{digits},{grouped}")
    };

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::snapshot::RealtimeRow;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1_000.0), "1,000");
        assert_eq!(format_grouped(1_234_567.6), "1,234,568");
        assert_eq!(format_grouped(-45_000.0), "-45,000");
    }

    #[test]
    fn test_kpis_from_snapshot() {
        let row = |id: &str, price: f64, cap: f64, volume: f64| RealtimeRow {
            id: id.to_string(),
            symbol: id[..3.min(id.len())].to_string(),
            date: String::new(),
            time: String::new(),
            current_price: price,
            market_cap: cap,
            total_volume: volume,
            high_24h: price,
            low_24h: price,
            price_change_24h: 0.0,
            price_change_percentage_24h: 0.0,
            ath: price,
            atl: price,
        };
        let snapshot = RealtimeSnapshot::new(
            vec![
                row("bitcoin", 60_000.0, 750_000.0, 1_000.0),
                row("ethereum", 3_000.0, 250_000.0, 500.0),
            ],
            None,
        );

        let kpis = KpiStrip::from_snapshot(&snapshot);
        assert_eq!(kpis.total_market_cap, 1_000_000.0);
        assert_eq!(kpis.btc_dominance, Some(75.0));
        assert_eq!(kpis.btc_price, Some(60_000.0));
        assert_eq!(kpis.ticker_items().len(), 4);
    }

    #[test]
    fn test_kpis_without_bitcoin() {
        let snapshot = RealtimeSnapshot::default();
        let kpis = KpiStrip::from_snapshot(&snapshot);
        assert!(kpis.btc_dominance.is_none());
        assert_eq!(kpis.ticker_items().len(), 2);
    }
}
