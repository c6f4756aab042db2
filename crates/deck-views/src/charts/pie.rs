//! Pie chart figure, drawn with the painter (egui_plot has no pie)

use egui::{Color32, Pos2, Shape, Stroke, Ui, Vec2};

use super::{empty_state, utils::colors::categorical_color};

/// One pie slice
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// Precomputed pie chart
#[derive(Debug, Clone, PartialEq)]
pub struct PieFigure {
    pub slices: Vec<PieSlice>,
}

impl PieFigure {
    /// Keep only slices with a positive value
    pub fn new(slices: Vec<(String, f64)>) -> Self {
        Self {
            slices: slices
                .into_iter()
                .filter(|(_, value)| *value > 0.0 && value.is_finite())
                .map(|(label, value)| PieSlice { label, value })
                .collect(),
        }
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub(crate) fn render(&self, ui: &mut Ui) {
        let total = self.total();
        if total <= 0.0 {
            empty_state(ui);
            return;
        }

        let available = ui.available_size();
        let diameter = available.x.min(available.y).max(120.0) * 0.8;
        let (rect, _) = ui.allocate_exact_size(available, egui::Sense::hover());
        let center = Pos2::new(rect.center().x - diameter * 0.25, rect.center().y);
        let radius = diameter / 2.0;
        let painter = ui.painter_at(rect);

        // Start at 12 o'clock, clockwise
        let mut angle = -std::f32::consts::FRAC_PI_2;
        for (i, slice) in self.slices.iter().enumerate() {
            let sweep = (slice.value / total) as f32 * std::f32::consts::TAU;
            let steps = ((sweep / 0.05).ceil() as usize).max(2);

            let mut points = vec![center];
            for step in 0..=steps {
                let a = angle + sweep * step as f32 / steps as f32;
                points.push(center + Vec2::new(a.cos(), a.sin()) * radius);
            }
            painter.add(Shape::convex_polygon(
                points,
                categorical_color(i),
                Stroke::new(1.0, Color32::from_gray(20)),
            ));
            angle += sweep;
        }

        // Legend to the right of the pie
        let legend_x = center.x + radius + 20.0;
        let mut legend_y = rect.center().y - self.slices.len() as f32 * 10.0;
        for (i, slice) in self.slices.iter().enumerate() {
            let swatch = egui::Rect::from_min_size(Pos2::new(legend_x, legend_y), Vec2::splat(12.0));
            painter.rect_filled(swatch, 2.0, categorical_color(i));
            painter.text(
                Pos2::new(legend_x + 18.0, legend_y),
                egui::Align2::LEFT_TOP,
                format!("{} ({:.1}%)", slice.label, slice.value / total * 100.0),
                egui::FontId::proportional(13.0),
                ui.visuals().text_color(),
            );
            legend_y += 20.0;
        }
    }
}
