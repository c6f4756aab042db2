//! Color utilities for charts

use egui::Color32;

/// Accent color shared with the theme (dashboard orange)
pub const ACCENT: Color32 = Color32::from_rgb(255, 140, 0);

/// Get a categorical color from the palette, one per coin
pub fn categorical_color(index: usize) -> Color32 {
    const PALETTE: &[Color32] = &[
        Color32::from_rgb(255, 140, 0),    // Orange (accent)
        Color32::from_rgb(100, 150, 250),  // Blue
        Color32::from_rgb(150, 250, 100),  // Green
        Color32::from_rgb(250, 100, 150),  // Pink
        Color32::from_rgb(150, 100, 250),  // Purple
        Color32::from_rgb(250, 250, 100),  // Yellow
        Color32::from_rgb(100, 250, 250),  // Cyan
        Color32::from_rgb(250, 100, 100),  // Red
        Color32::from_rgb(180, 180, 180),  // Gray
        Color32::from_rgb(140, 220, 170),  // Mint
    ];
    PALETTE[index % PALETTE.len()]
}

/// Diverging colormap for correlation values in [-1, 1]
///
/// Blue for negative, near-black around zero, orange for positive.
pub fn diverging_color(value: f64) -> Color32 {
    let t = value.clamp(-1.0, 1.0);
    let base = Color32::from_rgb(30, 30, 30);
    if t >= 0.0 {
        lerp_color(base, ACCENT, t as f32)
    } else {
        lerp_color(base, Color32::from_rgb(90, 140, 255), (-t) as f32)
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    Color32::from_rgb(
        channel(a.r(), b.r()),
        channel(a.g(), b.g()),
        channel(a.b(), b.b()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(categorical_color(0), categorical_color(10));
    }

    #[test]
    fn test_diverging_endpoints() {
        assert_eq!(diverging_color(1.0), ACCENT);
        assert_eq!(diverging_color(0.0), Color32::from_rgb(30, 30, 30));
        // Out-of-range input clamps
        assert_eq!(diverging_color(5.0), diverging_color(1.0));
    }
}
