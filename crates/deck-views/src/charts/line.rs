//! Time-series line figure

use chrono::DateTime;
use egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use super::utils::colors::categorical_color;

/// One line; x values are unix timestamps in seconds
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// Precomputed time-series line chart
#[derive(Debug, Clone, PartialEq)]
pub struct LineFigure {
    pub y_label: String,
    pub series: Vec<LineSeries>,
}

impl LineFigure {
    pub fn new(y_label: impl Into<String>, series: Vec<LineSeries>) -> Self {
        Self {
            y_label: y_label.into(),
            series,
        }
    }

    /// An empty subset still renders, as an empty plot
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    pub(crate) fn render(&self, ui: &mut Ui, id: &str) {
        let plot = Plot::new(format!("line_{id}"))
            .legend(Legend::default())
            .y_axis_label(&self.y_label)
            .x_axis_formatter(|val, _range, _specs| {
                match DateTime::from_timestamp(val as i64, 0) {
                    Some(dt) => dt.format("%m/%d %H:%M").to_string(),
                    None => format!("{val:.0}"),
                }
            })
            .allow_zoom(true)
            .allow_drag(true);

        plot.show(ui, |plot_ui| {
            for (i, series) in self.series.iter().enumerate() {
                plot_ui.line(
                    Line::new(PlotPoints::from(series.points.clone()))
                        .name(&series.name)
                        .color(categorical_color(i))
                        .width(1.5),
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        let empty = LineFigure::new("price", vec![LineSeries { name: "bitcoin".into(), points: vec![] }]);
        assert!(empty.is_empty());

        let full = LineFigure::new(
            "price",
            vec![LineSeries { name: "bitcoin".into(), points: vec![[0.0, 1.0]] }],
        );
        assert!(!full.is_empty());
    }
}
