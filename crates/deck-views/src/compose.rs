//! View composer
//!
//! `resolve` is a pure function of (navigation state, catalog, datasets):
//! no hidden inputs, so identical arguments always produce an identical
//! view.

use deck_core::navigation::NavigationContext;
use deck_core::snapshot::HistoricalSeries;

use crate::catalog::{SlideCatalog, SlideKind};
use crate::charts::{ChartFigure, LineFigure, LineSeries};

/// The (title, chart, selector) triple handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView {
    pub title: String,
    /// Entity-specific subtitle for parametric slides
    pub subtitle: Option<String>,
    pub figure: ChartFigure,
    /// Whether the coin selector dropdown is shown
    pub selector_visible: bool,
}

/// Resolve the slide to display for the current navigation state
pub fn resolve(
    nav: &NavigationContext,
    catalog: &SlideCatalog,
    historical: &HistoricalSeries,
) -> SlideView {
    let Some(slide) = catalog.get(nav.slide_index) else {
        // Unreachable while the engine's index invariant holds
        return SlideView {
            title: String::new(),
            subtitle: None,
            figure: ChartFigure::Line(LineFigure::new("", Vec::new())),
            selector_visible: false,
        };
    };

    match &slide.kind {
        SlideKind::Precomputed(figure) => SlideView {
            title: slide.title.clone(),
            subtitle: None,
            figure: figure.clone(),
            selector_visible: false,
        },
        SlideKind::Parametric(metric) => {
            let entity = &nav.selected_entity;
            // An unknown entity yields an empty, still-valid series
            let points = historical
                .rows_for(entity)
                .iter()
                .map(|r| [r.timestamp.and_utc().timestamp() as f64, metric.value(r)])
                .collect();
            let figure = ChartFigure::Line(LineFigure::new(
                metric.label(),
                vec![LineSeries { name: entity.clone(), points }],
            ));
            SlideView {
                title: slide.title.clone(),
                subtitle: Some(format!("{entity} {} Over Time", metric.label())),
                figure,
                selector_visible: true,
            }
        }
    }
}
