//! Chart figure model
//!
//! Every figure is precomputed pure data with a separate egui render
//! step, so the catalog can be built (and tested) without a UI.

mod bar;
mod heatmap;
mod histogram;
mod line;
mod pie;
mod scatter;
pub mod utils;

pub use bar::BarFigure;
pub use heatmap::HeatmapFigure;
pub use histogram::{HistBin, HistogramFigure};
pub use line::{LineFigure, LineSeries};
pub use pie::{PieFigure, PieSlice};
pub use scatter::{ScatterFigure, ScatterSeries};

use egui::Ui;

/// A chart ready to display
#[derive(Debug, Clone, PartialEq)]
pub enum ChartFigure {
    Histogram(HistogramFigure),
    Scatter(ScatterFigure),
    Bar(BarFigure),
    Pie(PieFigure),
    Line(LineFigure),
    Heatmap(HeatmapFigure),
}

impl ChartFigure {
    /// Whether the figure holds any data points at all
    ///
    /// Empty figures are a normal outcome (e.g. an unknown entity on a
    /// parametric slide) and still render, as an empty plot.
    pub fn is_empty(&self) -> bool {
        match self {
            ChartFigure::Histogram(figure) => figure.bins.is_empty(),
            ChartFigure::Scatter(figure) => figure.series.iter().all(|s| s.points.is_empty()),
            ChartFigure::Bar(figure) => figure.bars.is_empty(),
            ChartFigure::Pie(figure) => figure.slices.is_empty(),
            ChartFigure::Line(figure) => figure.series.iter().all(|s| s.points.is_empty()),
            ChartFigure::Heatmap(figure) => figure.labels.is_empty(),
        }
    }

    /// Render the figure into the available space
    pub fn render(&self, ui: &mut Ui, id: &str) {
        match self {
            ChartFigure::Histogram(figure) => figure.render(ui, id),
            ChartFigure::Scatter(figure) => figure.render(ui, id),
            ChartFigure::Bar(figure) => figure.render(ui, id),
            ChartFigure::Pie(figure) => figure.render(ui),
            ChartFigure::Line(figure) => figure.render(ui, id),
            ChartFigure::Heatmap(figure) => figure.render(ui),
        }
    }
}

/// Placeholder shown by figures that have nothing to draw
pub(crate) fn empty_state(ui: &mut Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(egui::RichText::new("No data to display").weak());
    });
}
