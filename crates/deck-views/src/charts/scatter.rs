//! Scatter figure, one series per coin

use egui::Ui;
use egui_plot::{Legend, Plot, Points};

use super::utils::colors::categorical_color;

/// Points for one coin
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// Precomputed scatter plot grouped by coin id
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterFigure {
    /// Group `(id, x, y)` rows into one series per id, first-seen order
    pub fn from_rows(
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        rows: impl IntoIterator<Item = (String, f64, f64)>,
    ) -> Self {
        let mut series: Vec<ScatterSeries> = Vec::new();
        for (id, x, y) in rows {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            match series.iter_mut().find(|s| s.name == id) {
                Some(existing) => existing.points.push([x, y]),
                None => series.push(ScatterSeries { name: id, points: vec![[x, y]] }),
            }
        }
        Self {
            x_label: x_label.into(),
            y_label: y_label.into(),
            series,
        }
    }

    pub(crate) fn render(&self, ui: &mut Ui, id: &str) {
        let plot = Plot::new(format!("scatter_{id}"))
            .legend(Legend::default())
            .x_axis_label(&self.x_label)
            .y_axis_label(&self.y_label)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_boxed_zoom(true);

        plot.show(ui, |plot_ui| {
            for (i, series) in self.series.iter().enumerate() {
                plot_ui.points(
                    Points::new(series.points.clone())
                        .name(&series.name)
                        .color(categorical_color(i))
                        .radius(2.5),
                );
            }
        });
    }
}
