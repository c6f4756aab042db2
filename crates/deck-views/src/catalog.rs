//! The ordered slide catalog
//!
//! Slides are tagged variants: either a chart precomputed from the
//! snapshot tables at catalog build time, or a parametric slide rendered
//! per selected coin by the composer.

use deck_core::snapshot::{HistoricalSeries, Metric, RealtimeSnapshot};

use crate::charts::{
    BarFigure, ChartFigure, HeatmapFigure, HistogramFigure, PieFigure, ScatterFigure,
    ScatterSeries,
};

const HISTOGRAM_BINS: usize = 50;
const TOP_N: usize = 10;

/// What a slide shows
#[derive(Debug, Clone, PartialEq)]
pub enum SlideKind {
    /// Fixed chart built once from the snapshot tables
    Precomputed(ChartFigure),
    /// Per-coin time series of one metric, resolved against the current
    /// selection
    Parametric(Metric),
}

/// One named, orderable view in the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct SlideDefinition {
    pub title: String,
    pub kind: SlideKind,
}

impl SlideDefinition {
    fn precomputed(title: &str, figure: ChartFigure) -> Self {
        Self {
            title: title.to_string(),
            kind: SlideKind::Precomputed(figure),
        }
    }

    fn parametric(title: &str, metric: Metric) -> Self {
        Self {
            title: title.to_string(),
            kind: SlideKind::Parametric(metric),
        }
    }
}

/// Ordered, fixed list of slides; a slide's identity is its position
pub struct SlideCatalog {
    slides: Vec<SlideDefinition>,
    realtime_count: usize,
}

impl SlideCatalog {
    /// Build the standard dashboard catalog from the two tables
    pub fn standard(realtime: &RealtimeSnapshot, historical: &HistoricalSeries) -> Self {
        let mut slides = Vec::with_capacity(15);

        // Realtime insights
        slides.push(SlideDefinition::precomputed(
            "Market Cap Distribution",
            ChartFigure::Histogram(HistogramFigure::from_values(
                "market_cap",
                &realtime.rows.iter().map(|r| r.market_cap).collect::<Vec<_>>(),
                HISTOGRAM_BINS,
            )),
        ));
        slides.push(SlideDefinition::precomputed(
            "Current Price Distribution",
            ChartFigure::Histogram(HistogramFigure::from_values(
                "current_price",
                &realtime.rows.iter().map(|r| r.current_price).collect::<Vec<_>>(),
                HISTOGRAM_BINS,
            )),
        ));
        slides.push(SlideDefinition::precomputed(
            "Market Cap vs Volume",
            ChartFigure::Scatter(ScatterFigure::from_rows(
                "market_cap",
                "total_volume",
                realtime.rows.iter().map(|r| (r.id.clone(), r.market_cap, r.total_volume)),
            )),
        ));
        slides.push(SlideDefinition::precomputed(
            "Price Change % in 24h",
            ChartFigure::Histogram(HistogramFigure::from_values(
                "price_change_percentage_24h",
                &realtime
                    .rows
                    .iter()
                    .map(|r| r.price_change_percentage_24h)
                    .collect::<Vec<_>>(),
                HISTOGRAM_BINS,
            )),
        ));
        slides.push(SlideDefinition::precomputed(
            "Market Cap vs Price Change %",
            ChartFigure::Scatter(ScatterFigure::from_rows(
                "market_cap",
                "price_change_percentage_24h",
                realtime
                    .rows
                    .iter()
                    .map(|r| (r.id.clone(), r.market_cap, r.price_change_percentage_24h)),
            )),
        ));
        slides.push(SlideDefinition::precomputed(
            "Top 10 Most Traded",
            ChartFigure::Bar(BarFigure::new(
                "total_volume",
                realtime
                    .top_by_volume(TOP_N)
                    .iter()
                    .map(|r| (r.id.clone(), r.total_volume))
                    .collect(),
            )),
        ));
        let top10_cap: f64 = realtime.top_by_market_cap(TOP_N).iter().map(|r| r.market_cap).sum();
        let rest_cap = (realtime.total_market_cap() - top10_cap).max(0.0);
        slides.push(SlideDefinition::precomputed(
            "Top 10 vs Rest",
            ChartFigure::Pie(PieFigure::new(vec![
                ("Top 10 Coins".to_string(), top10_cap),
                ("Other Coins".to_string(), rest_cap),
            ])),
        ));
        let realtime_count = slides.len();

        // Historical insights
        slides.push(SlideDefinition::parametric("Price Over Time", Metric::Price));
        slides.push(SlideDefinition::parametric("Market Cap Over Time", Metric::MarketCap));
        slides.push(SlideDefinition::parametric("Volume Over Time", Metric::Volume));
        slides.push(SlideDefinition::precomputed(
            "Market Cap vs Price",
            ChartFigure::Scatter(ScatterFigure::from_rows(
                "price",
                "market_cap",
                historical.rows.iter().map(|r| (r.id.clone(), r.price, r.market_cap)),
            )),
        ));
        let (entities, columns) = historical.price_pivot();
        slides.push(SlideDefinition::precomputed(
            "Correlation Between Crypto Prices",
            ChartFigure::Heatmap(HeatmapFigure::correlation(entities, &columns)),
        ));
        slides.push(SlideDefinition::precomputed(
            "How far are current price of coins from their ATH",
            ChartFigure::Bar(BarFigure::new(
                "current_vs_ath",
                historical
                    .last_per_entity()
                    .iter()
                    .filter(|r| r.ath != 0.0)
                    .map(|r| (r.id.clone(), r.price / r.ath * 100.0))
                    .collect(),
            )),
        ));
        slides.push(SlideDefinition::precomputed(
            "Market Cap of BTC vs Other Cryptos",
            ChartFigure::Line(relative_to_btc(historical, Metric::MarketCap)),
        ));
        slides.push(SlideDefinition::precomputed(
            "Price of BTC vs Other Cryptos",
            ChartFigure::Line(relative_to_btc(historical, Metric::Price)),
        ));

        Self { slides, realtime_count }
    }

    /// Build a catalog from explicit slides (tests, custom layouts)
    pub fn from_slides(slides: Vec<SlideDefinition>, realtime_count: usize) -> Self {
        let realtime_count = realtime_count.min(slides.len());
        Self { slides, realtime_count }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SlideDefinition> {
        self.slides.get(index)
    }

    pub fn slides(&self) -> &[SlideDefinition] {
        &self.slides
    }

    /// Slides in the "Real Time Insights" sidebar section
    pub fn realtime_slides(&self) -> &[SlideDefinition] {
        &self.slides[..self.realtime_count]
    }

    /// Slides in the "Historical Insights" sidebar section
    pub fn historical_slides(&self) -> &[SlideDefinition] {
        &self.slides[self.realtime_count..]
    }

    pub fn realtime_count(&self) -> usize {
        self.realtime_count
    }
}

/// Each non-BTC coin's metric as a percentage of mean BTC metric
fn relative_to_btc(historical: &HistoricalSeries, metric: Metric) -> crate::charts::LineFigure {
    use crate::charts::{LineFigure, LineSeries};

    let y_label = format!("% of mean BTC {}", metric.label().to_lowercase());
    let Some(btc_mean) = historical.mean_metric(deck_core::DEFAULT_ENTITY, metric) else {
        return LineFigure::new(y_label, Vec::new());
    };
    if btc_mean == 0.0 {
        return LineFigure::new(y_label, Vec::new());
    }

    let series = historical
        .entities()
        .into_iter()
        .filter(|id| id != deck_core::DEFAULT_ENTITY)
        .map(|id| {
            let points = historical
                .rows_for(&id)
                .iter()
                .map(|r| {
                    [
                        r.timestamp.and_utc().timestamp() as f64,
                        metric.value(r) / btc_mean * 100.0,
                    ]
                })
                .collect();
            LineSeries { name: id, points }
        })
        .collect();

    LineFigure::new(y_label, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use deck_core::snapshot::{HistoricalRow, RealtimeRow};

    fn realtime_row(id: &str, price: f64, cap: f64, volume: f64) -> RealtimeRow {
        RealtimeRow {
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
            price_change_percentage_24h: 1.0,
            ath: price * 2.0,
            atl: 1.0,
        }
    }

    fn historical_row(id: &str, day: u32, price: f64) -> HistoricalRow {
        HistoricalRow {
            id: id.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2025, 8, day).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            price,
            market_cap: price * 1000.0,
            total_volume: price * 100.0,
            ath: price * 2.0,
        }
    }

    fn sample_tables() -> (RealtimeSnapshot, HistoricalSeries) {
        let realtime = RealtimeSnapshot::new(
            vec![
                realtime_row("bitcoin", 60_000.0, 1_200_000.0, 30_000.0),
                realtime_row("ethereum", 3_000.0, 400_000.0, 20_000.0),
            ],
            None,
        );
        let historical = HistoricalSeries::new(
            vec![
                historical_row("bitcoin", 1, 60_000.0),
                historical_row("bitcoin", 2, 61_000.0),
                historical_row("ethereum", 1, 3_000.0),
                historical_row("ethereum", 2, 3_100.0),
            ],
            None,
        );
        (realtime, historical)
    }

    #[test]
    fn test_standard_catalog_shape() {
        let (realtime, historical) = sample_tables();
        let catalog = SlideCatalog::standard(&realtime, &historical);

        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.realtime_count(), 7);
        assert_eq!(catalog.realtime_slides().len(), 7);
        assert_eq!(catalog.historical_slides().len(), 8);
        assert_eq!(catalog.get(0).unwrap().title, "Market Cap Distribution");
        assert_eq!(catalog.get(6).unwrap().title, "Top 10 vs Rest");
        assert_eq!(catalog.get(14).unwrap().title, "Price of BTC vs Other Cryptos");
        assert!(catalog.get(15).is_none());
    }

    #[test]
    fn test_parametric_slides_are_7_through_9() {
        let (realtime, historical) = sample_tables();
        let catalog = SlideCatalog::standard(&realtime, &historical);

        for (index, metric) in [(7, Metric::Price), (8, Metric::MarketCap), (9, Metric::Volume)] {
            assert_eq!(catalog.get(index).unwrap().kind, SlideKind::Parametric(metric));
        }
        assert!(matches!(catalog.get(0).unwrap().kind, SlideKind::Precomputed(_)));
    }

    #[test]
    fn test_relative_to_btc_excludes_bitcoin() {
        let (_, historical) = sample_tables();
        let figure = relative_to_btc(&historical, Metric::Price);
        assert_eq!(figure.series.len(), 1);
        assert_eq!(figure.series[0].name, "ethereum");
        // 3000 / mean(60000, 61000) * 100
        let expected = 3_000.0 / 60_500.0 * 100.0;
        assert!((figure.series[0].points[0][1] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_relative_to_btc_without_bitcoin_is_empty() {
        let historical = HistoricalSeries::new(vec![historical_row("ethereum", 1, 3_000.0)], None);
        assert!(relative_to_btc(&historical, Metric::MarketCap).is_empty());
    }
}
