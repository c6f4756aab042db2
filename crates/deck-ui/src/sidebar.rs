//! Sidebar slide menu
//!
//! Two collapsible sections mirroring the catalog split; clicking an
//! entry returns its catalog index for the app to dispatch as a jump.

use deck_views::catalog::SlideCatalog;
use egui::Ui;

/// One icon per standard slide, in catalog order
const SLIDE_ICONS: &[&str] = &[
    "📊", "💰", "🔄", "📈", "📉", "🔥", "🥧", "🕒", "🏛", "🔊", "💹", "📊", "📏", "🔁", "⚖",
];

/// Sidebar panel widget
pub struct SidebarPanel;

impl SidebarPanel {
    pub fn new() -> Self {
        Self
    }

    /// Show the slide menu; returns the index of a clicked slide
    pub fn ui(&mut self, ui: &mut Ui, catalog: &SlideCatalog, current: usize) -> Option<usize> {
        let mut clicked = None;

        ui.add_space(8.0);
        ui.heading("Slides");
        ui.separator();

        egui::CollapsingHeader::new("Real Time Insights")
            .default_open(true)
            .show(ui, |ui| {
                for (i, slide) in catalog.realtime_slides().iter().enumerate() {
                    if self.slide_link(ui, i, &slide.title, current) {
                        clicked = Some(i);
                    }
                }
            });

        egui::CollapsingHeader::new("Historical Insights")
            .default_open(true)
            .show(ui, |ui| {
                let offset = catalog.realtime_count();
                for (i, slide) in catalog.historical_slides().iter().enumerate() {
                    if self.slide_link(ui, offset + i, &slide.title, current) {
                        clicked = Some(offset + i);
                    }
                }
            });

        clicked
    }

    fn slide_link(&self, ui: &mut Ui, index: usize, title: &str, current: usize) -> bool {
        let icon = SLIDE_ICONS.get(index).copied().unwrap_or("•");
        ui.selectable_label(index == current, format!("{icon} {title}"))
            .clicked()
    }
}

impl Default for SidebarPanel {
    fn default() -> Self {
        Self::new()
    }
}
