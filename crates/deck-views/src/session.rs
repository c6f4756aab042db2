//! Dashboard session
//!
//! All state for one client session lives here: the two snapshot
//! tables, the catalog built from them, the navigation and layout
//! machines and the event bus. There is no ambient global; the app
//! constructs a session after data loading and owns it for its
//! lifetime.

use std::sync::Arc;

use chrono::NaiveDateTime;
use deck_core::events::{events, EventBus};
use deck_core::navigation::{NavigationEngine, NavigationError};
use deck_core::snapshot::{HistoricalSeries, RealtimeSnapshot};
use deck_core::{LayoutState, DEFAULT_ENTITY};
use parking_lot::RwLock;
use tracing::debug;

use crate::catalog::SlideCatalog;
use crate::compose::{resolve, SlideView};
use crate::kpi::KpiStrip;

/// A discrete user interaction, processed one at a time
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    NextSlide,
    PreviousSlide,
    JumpToSlide(usize),
    SelectEntity(String),
    ToggleSidebar,
}

/// Per-session dashboard state
pub struct DashboardSession {
    navigation: Arc<NavigationEngine>,
    layout: LayoutState,
    event_bus: Arc<EventBus>,
    catalog: SlideCatalog,
    historical: HistoricalSeries,
    kpis: KpiStrip,
    entities: Vec<String>,
    last_updated: Option<NaiveDateTime>,
    // Memoizes the last resolution per (slide, entity) pair
    view_cache: RwLock<Option<((usize, String), SlideView)>>,
}

impl DashboardSession {
    /// Build a session over freshly loaded tables
    pub fn new(realtime: RealtimeSnapshot, historical: HistoricalSeries) -> Self {
        let catalog = SlideCatalog::standard(&realtime, &historical);
        let kpis = KpiStrip::from_snapshot(&realtime);
        let entities = historical.entities();
        let last_updated = match (realtime.captured_at, historical.captured_at) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };

        Self {
            navigation: Arc::new(NavigationEngine::new(catalog.len(), DEFAULT_ENTITY)),
            layout: LayoutState::new(),
            event_bus: Arc::new(EventBus::new()),
            catalog,
            historical,
            kpis,
            entities,
            last_updated,
            view_cache: RwLock::new(None),
        }
    }

    /// Dispatch one interaction through the handler table
    ///
    /// The only fallible transition is an explicit out-of-range jump.
    pub fn handle(&self, event: InputEvent) -> Result<(), NavigationError> {
        debug!(?event, "handling input event");
        match event {
            InputEvent::NextSlide => {
                self.navigation.next();
                self.publish_slide_changed();
            }
            InputEvent::PreviousSlide => {
                self.navigation.previous();
                self.publish_slide_changed();
            }
            InputEvent::JumpToSlide(index) => {
                self.navigation.jump(index)?;
                self.publish_slide_changed();
            }
            InputEvent::SelectEntity(id) => {
                self.navigation.select_entity(&id);
                self.event_bus.publish(events::EntitySelected {
                    entity: self.navigation.context().selected_entity,
                });
            }
            InputEvent::ToggleSidebar => {
                let visible = self.layout.toggle_sidebar();
                self.event_bus.publish(events::SidebarToggled { visible });
            }
        }
        Ok(())
    }

    fn publish_slide_changed(&self) {
        let context = self.navigation.context();
        let title = self
            .catalog
            .get(context.slide_index)
            .map(|slide| slide.title.clone())
            .unwrap_or_default();
        self.event_bus.publish(events::SlideChanged {
            slide_index: context.slide_index,
            title,
        });
    }

    /// Resolve the view for the current state, memoized per
    /// (slide, entity) pair
    pub fn current_view(&self) -> SlideView {
        let context = self.navigation.context();
        let key = (context.slide_index, context.selected_entity.clone());

        if let Some((cached_key, view)) = self.view_cache.read().as_ref() {
            if *cached_key == key {
                return view.clone();
            }
        }

        let view = resolve(&context, &self.catalog, &self.historical);
        *self.view_cache.write() = Some((key, view.clone()));
        view
    }

    pub fn sidebar_visible(&self) -> bool {
        self.layout.sidebar_visible()
    }

    pub fn slide_index(&self) -> usize {
        self.navigation.context().slide_index
    }

    pub fn selected_entity(&self) -> String {
        self.navigation.context().selected_entity
    }

    pub fn catalog(&self) -> &SlideCatalog {
        &self.catalog
    }

    pub fn kpis(&self) -> &KpiStrip {
        &self.kpis
    }

    /// Coin ids offered by the selector dropdown
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    pub fn last_updated(&self) -> Option<NaiveDateTime> {
        self.last_updated
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    pub fn navigation(&self) -> &Arc<NavigationEngine> {
        &self.navigation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use deck_core::snapshot::{HistoricalRow, RealtimeRow};

    fn sample_session() -> DashboardSession {
        let row = |id: &str| RealtimeRow {
            id: id.to_string(),
            symbol: id[..3.min(id.len())].to_string(),
            date: String::new(),
            time: String::new(),
            current_price: 100.0,
            market_cap: 1_000.0,
            total_volume: 10.0,
            high_24h: 110.0,
            low_24h: 90.0,
            price_change_24h: 1.0,
            price_change_percentage_24h: 1.0,
            ath: 200.0,
            atl: 1.0,
        };
        let historical = HistoricalSeries::new(
            vec![
                HistoricalRow {
                    id: "bitcoin".to_string(),
                    timestamp: NaiveDate::from_ymd_opt(2025, 8, 1)
                        .unwrap()
                        .and_hms_opt(0, 0, 0)
                        .unwrap(),
                    price: 60_000.0,
                    market_cap: 1_200_000.0,
                    total_volume: 30_000.0,
                    ath: 73_000.0,
                },
                HistoricalRow {
                    id: "ethereum".to_string(),
                    timestamp: NaiveDate::from_ymd_opt(2025, 8, 1)
                        .unwrap()
                        .and_hms_opt(0, 0, 0)
                        .unwrap(),
                    price: 3_000.0,
                    market_cap: 400_000.0,
                    total_volume: 20_000.0,
                    ath: 4_800.0,
                },
            ],
            None,
        );
        DashboardSession::new(
            RealtimeSnapshot::new(vec![row("bitcoin"), row("ethereum")], None),
            historical,
        )
    }

    #[test]
    fn test_session_defaults() {
        let session = sample_session();
        assert_eq!(session.slide_index(), 0);
        assert_eq!(session.selected_entity(), "bitcoin");
        assert!(session.sidebar_visible());
        assert_eq!(session.entities(), ["bitcoin", "ethereum"]);
    }

    #[test]
    fn test_navigation_events_wrap() {
        let session = sample_session();
        session.handle(InputEvent::PreviousSlide).unwrap();
        assert_eq!(session.slide_index(), 14);
        session.handle(InputEvent::NextSlide).unwrap();
        assert_eq!(session.slide_index(), 0);
    }

    #[test]
    fn test_jump_out_of_range_rejected() {
        let session = sample_session();
        let err = session.handle(InputEvent::JumpToSlide(99)).unwrap_err();
        assert_eq!(err, NavigationError::OutOfRange { index: 99, len: 15 });
        assert_eq!(session.slide_index(), 0);
    }

    #[test]
    fn test_toggle_sidebar_twice_restores() {
        let session = sample_session();
        session.handle(InputEvent::ToggleSidebar).unwrap();
        assert!(!session.sidebar_visible());
        session.handle(InputEvent::ToggleSidebar).unwrap();
        assert!(session.sidebar_visible());
    }

    #[test]
    fn test_current_view_follows_state() {
        let session = sample_session();
        session.handle(InputEvent::JumpToSlide(7)).unwrap();
        let view = session.current_view();
        assert!(view.selector_visible);
        assert_eq!(view.subtitle.as_deref(), Some("bitcoin Price Over Time"));

        session
            .handle(InputEvent::SelectEntity("ethereum".to_string()))
            .unwrap();
        let view = session.current_view();
        assert_eq!(view.subtitle.as_deref(), Some("ethereum Price Over Time"));
    }

    #[test]
    fn test_view_memoization_is_transparent() {
        let session = sample_session();
        session.handle(InputEvent::JumpToSlide(8)).unwrap();
        let first = session.current_view();
        let second = session.current_view();
        assert_eq!(first, second);

        // Selection change invalidates the cached pair
        session
            .handle(InputEvent::SelectEntity("ethereum".to_string()))
            .unwrap();
        assert_ne!(session.current_view(), first);
    }

    #[test]
    fn test_empty_selection_keeps_prior_entity() {
        let session = sample_session();
        session
            .handle(InputEvent::SelectEntity("ethereum".to_string()))
            .unwrap();
        session.handle(InputEvent::SelectEntity(String::new())).unwrap();
        assert_eq!(session.selected_entity(), "ethereum");
    }
}
