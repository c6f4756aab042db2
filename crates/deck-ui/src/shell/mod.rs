//! Shell chrome: header bar with KPI ticker, and the footer

use deck_views::session::DashboardSession;
use deck_views::InputEvent;
use egui::{Context, RichText, TopBottomPanel};

/// Render the header bar; returns a toggle event when the sidebar
/// button is clicked
pub fn header_bar(ctx: &Context, session: &DashboardSession) -> Option<InputEvent> {
    let mut event = None;

    TopBottomPanel::top("header_bar").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui
                .button(RichText::new("☰").size(18.0))
                .on_hover_text("Toggle sidebar")
                .clicked()
            {
                event = Some(InputEvent::ToggleSidebar);
            }

            ui.vertical_centered(|ui| {
                ui.heading("Cryptocurrency Dashboard");
                if let Some(updated) = session.last_updated() {
                    ui.label(
                        RichText::new(format!(
                            "Last updated: {}",
                            updated.format("%Y-%m-%d %H:%M:%S")
                        ))
                        .weak(),
                    );
                }
            });
        });

        ui.separator();
        ui.horizontal(|ui| {
            for item in session.kpis().ticker_items() {
                ui.label(RichText::new(item).strong());
                ui.add_space(24.0);
            }
        });
        ui.add_space(4.0);
    });

    event
}

/// Render the footer strip
pub fn footer(ctx: &Context) {
    TopBottomPanel::bottom("footer").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("coindeck").weak().small());
        });
    });
}
