//! Bar chart figure with categorical x axis

use egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use super::{empty_state, utils::colors::ACCENT};

/// Precomputed bar chart, one labeled bar per category
#[derive(Debug, Clone, PartialEq)]
pub struct BarFigure {
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
}

impl BarFigure {
    pub fn new(y_label: impl Into<String>, bars: Vec<(String, f64)>) -> Self {
        Self {
            y_label: y_label.into(),
            bars,
        }
    }

    pub(crate) fn render(&self, ui: &mut Ui, id: &str) {
        if self.bars.is_empty() {
            empty_state(ui);
            return;
        }

        let labels: Vec<String> = self.bars.iter().map(|(label, _)| label.clone()).collect();
        let plot = Plot::new(format!("bar_{id}"))
            .y_axis_label(&self.y_label)
            .x_axis_formatter(move |val, _range, _specs| {
                let idx = val.round();
                if idx < 0.0 || (val - idx).abs() > 0.25 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .allow_zoom(true)
            .allow_drag(true);

        plot.show(ui, |plot_ui| {
            let bars = self
                .bars
                .iter()
                .enumerate()
                .map(|(i, (label, value))| {
                    Bar::new(i as f64, *value).width(0.7).name(label).fill(ACCENT)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(ACCENT));
        });
    }
}
