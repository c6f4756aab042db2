//! Histogram figure

use egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use super::{empty_state, utils::colors::ACCENT};

/// One histogram bin, half-open [start, end)
#[derive(Debug, Clone, PartialEq)]
pub struct HistBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Precomputed histogram over one column
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramFigure {
    pub x_label: String,
    pub bins: Vec<HistBin>,
}

impl HistogramFigure {
    /// Bin `values` into `num_bins` equal-width bins
    ///
    /// Non-finite values are dropped; the last bin is closed so the
    /// maximum lands inside it.
    pub fn from_values(x_label: impl Into<String>, values: &[f64], num_bins: usize) -> Self {
        let x_label = x_label.into();
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        if finite.is_empty() || num_bins == 0 {
            return Self { x_label, bins: Vec::new() };
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return Self {
                x_label,
                bins: vec![HistBin { start: min, end: max, count: finite.len() }],
            };
        }

        let width = (max - min) / num_bins as f64;
        let mut bins: Vec<HistBin> = (0..num_bins)
            .map(|i| HistBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count: 0,
            })
            .collect();

        for value in &finite {
            let idx = (((value - min) / width) as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { x_label, bins }
    }

    /// Total number of binned values
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub(crate) fn render(&self, ui: &mut Ui, id: &str) {
        if self.bins.is_empty() {
            empty_state(ui);
            return;
        }

        let plot = Plot::new(format!("histogram_{id}"))
            .x_axis_label(&self.x_label)
            .y_axis_label("count")
            .allow_zoom(true)
            .allow_drag(true);

        plot.show(ui, |plot_ui| {
            let bars = self
                .bins
                .iter()
                .map(|bin| {
                    Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                        .width((bin.end - bin.start) * 0.95)
                        .fill(ACCENT)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(ACCENT));
        });
    }
}
