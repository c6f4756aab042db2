//! Correlation heatmap figure, drawn with the painter

use egui::{Align2, FontId, Pos2, Rect, Sense, Ui, Vec2};

use super::utils::colors::diverging_color;
use super::utils::stats::correlation_matrix;
use super::empty_state;

/// Precomputed square matrix with row/column labels
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapFigure {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl HeatmapFigure {
    /// Build a Pearson correlation heatmap over aligned columns
    pub fn correlation(labels: Vec<String>, columns: &[Vec<f64>]) -> Self {
        Self {
            values: correlation_matrix(columns),
            labels,
        }
    }

    pub(crate) fn render(&self, ui: &mut Ui) {
        let n = self.labels.len();
        if n == 0 {
            empty_state(ui);
            return;
        }

        let label_gutter = 110.0;
        let available = ui.available_size();
        let (rect, _) = ui.allocate_exact_size(available, Sense::hover());
        let painter = ui.painter_at(rect);

        let grid = Rect::from_min_size(
            rect.min + Vec2::new(label_gutter, 24.0),
            rect.size() - Vec2::new(label_gutter + 8.0, 32.0),
        );
        let cell = Vec2::new(grid.width() / n as f32, grid.height() / n as f32);
        let text_color = ui.visuals().text_color();

        for (row, row_values) in self.values.iter().enumerate() {
            // Row label
            painter.text(
                Pos2::new(rect.min.x + label_gutter - 8.0, grid.min.y + (row as f32 + 0.5) * cell.y),
                Align2::RIGHT_CENTER,
                &self.labels[row],
                FontId::proportional(12.0),
                text_color,
            );

            for (col, value) in row_values.iter().enumerate() {
                let min = grid.min + Vec2::new(col as f32 * cell.x, row as f32 * cell.y);
                let cell_rect = Rect::from_min_size(min, cell).shrink(1.0);
                painter.rect_filled(cell_rect, 2.0, diverging_color(*value));
                if cell.x > 34.0 && cell.y > 16.0 {
                    painter.text(
                        cell_rect.center(),
                        Align2::CENTER_CENTER,
                        format!("{value:.2}"),
                        FontId::monospace(11.0),
                        text_color,
                    );
                }
            }
        }

        // Abbreviated column labels along the top
        for (col, label) in self.labels.iter().enumerate() {
            let short: String = label.chars().take(4).collect();
            painter.text(
                Pos2::new(grid.min.x + (col as f32 + 0.5) * cell.x, rect.min.y + 12.0),
                Align2::CENTER_CENTER,
                short,
                FontId::proportional(11.0),
                text_color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_heatmap_shape() {
        let columns = vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]];
        let figure = HeatmapFigure::correlation(vec!["bitcoin".into(), "ethereum".into()], &columns);
        assert_eq!(figure.values.len(), 2);
        assert_eq!(figure.values[0].len(), 2);
        assert!((figure.values[0][1] - 1.0).abs() < 1e-12);
    }
}
