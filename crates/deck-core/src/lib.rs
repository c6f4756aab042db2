//! Core state management for the coindeck dashboard.
//!
//! This crate provides the slide navigation and layout state machines,
//! the typed snapshot table model and the provider trait implemented
//! by the data layer.

pub mod events;
pub mod layout;
pub mod navigation;
pub mod provider;
pub mod snapshot;

// Re-export commonly used types
pub use layout::LayoutState;
pub use navigation::{
    NavigationContext, NavigationEngine, NavigationError, NavigationSubscriber, StepDirection,
};
pub use provider::SnapshotProvider;
pub use snapshot::{HistoricalRow, HistoricalSeries, Metric, RealtimeRow, RealtimeSnapshot};

/// Entity selected when a session starts.
pub const DEFAULT_ENTITY: &str = "bitcoin";
