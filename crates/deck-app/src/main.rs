//! Dashboard entry point

use anyhow::{Context as _, Result};
use eframe::egui;
use tracing::{info, warn};

use deck_core::events::{events, handler_from_fn};
use deck_core::SnapshotProvider;
use deck_data::CsvSnapshotProvider;
use deck_ui::{apply_theme, footer, header_bar, SidebarPanel, Theme};
use deck_views::{DashboardSession, InputEvent};

/// Main application state
struct CoindeckApp {
    session: DashboardSession,
    sidebar: SidebarPanel,
}

impl CoindeckApp {
    fn new(cc: &eframe::CreationContext<'_>, session: DashboardSession) -> Self {
        apply_theme(&cc.egui_ctx, &Theme::default());
        Self {
            session,
            sidebar: SidebarPanel::new(),
        }
    }
}

impl eframe::App for CoindeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Interactions collected this frame, dispatched at the end so the
        // rendered view stays a function of one consistent state
        let mut pending: Vec<InputEvent> = Vec::new();

        if let Some(event) = header_bar(ctx, &self.session) {
            pending.push(event);
        }

        if self.session.sidebar_visible() {
            egui::SidePanel::left("sidebar")
                .default_width(250.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        if let Some(index) =
                            self.sidebar.ui(ui, self.session.catalog(), self.session.slide_index())
                        {
                            pending.push(InputEvent::JumpToSlide(index));
                        }
                    });
                });
        }

        footer(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let view = self.session.current_view();

            ui.vertical_centered(|ui| {
                ui.add_space(6.0);
                ui.heading(&view.title);
                if let Some(subtitle) = &view.subtitle {
                    ui.label(egui::RichText::new(subtitle).weak());
                }
            });

            if view.selector_visible {
                ui.horizontal(|ui| {
                    ui.label("Coin:");
                    let mut selected = self.session.selected_entity();
                    egui::ComboBox::from_id_source("coin_select")
                        .selected_text(selected.clone())
                        .show_ui(ui, |ui| {
                            for entity in self.session.entities().to_vec() {
                                ui.selectable_value(&mut selected, entity.clone(), entity);
                            }
                        });
                    if selected != self.session.selected_entity() {
                        pending.push(InputEvent::SelectEntity(selected));
                    }
                });
            }

            // Keep room for the navigation buttons below the chart
            let chart_height = (ui.available_height() - 48.0).max(120.0);
            ui.allocate_ui(egui::Vec2::new(ui.available_width(), chart_height), |ui| {
                view.figure.render(ui, "main");
            });

            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    let spacing = (ui.available_width() - 180.0).max(0.0) / 2.0;
                    ui.add_space(spacing);
                    if ui.button("Previous").clicked() {
                        pending.push(InputEvent::PreviousSlide);
                    }
                    if ui.button("Next").clicked() {
                        pending.push(InputEvent::NextSlide);
                    }
                });
            });
        });

        for event in pending {
            if let Err(error) = self.session.handle(event) {
                warn!(%error, "rejected input event");
            }
        }
    }
}

fn load_session(data_dir: &str) -> Result<DashboardSession> {
    let runtime = tokio::runtime::Runtime::new()?;
    let provider = CsvSnapshotProvider::new(data_dir);

    let realtime = runtime
        .block_on(provider.latest_realtime())
        .context("loading realtime snapshot")?;
    let historical = runtime
        .block_on(provider.latest_historical())
        .context("loading historical series")?;

    let realtime_rows = realtime.len();
    let historical_rows = historical.len();
    let session = DashboardSession::new(realtime, historical);

    // Log slide changes for the session's lifetime
    session.event_bus().subscribe::<events::SlideChanged>(handler_from_fn(|event| {
        if let Some(slide) = event.as_any().downcast_ref::<events::SlideChanged>() {
            info!(index = slide.slide_index, title = %slide.title, "slide changed");
        }
    }));
    session.event_bus().publish(events::SnapshotLoaded {
        source_name: provider.source_name().to_string(),
        realtime_rows,
        historical_rows,
        captured_at: session.last_updated(),
    });

    info!(
        realtime_rows,
        historical_rows,
        slides = session.catalog().len(),
        "dashboard session ready"
    );
    Ok(session)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let data_dir = std::env::var("COINDECK_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let session = load_session(&data_dir)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Coindeck",
        options,
        Box::new(|cc| Box::new(CoindeckApp::new(cc, session))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run app: {e}"))?;

    Ok(())
}
