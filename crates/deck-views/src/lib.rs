//! Slide catalog, chart figures and view composition for the dashboard

pub mod catalog;
pub mod charts;
pub mod compose;
pub mod kpi;
pub mod session;

pub use catalog::{SlideCatalog, SlideDefinition, SlideKind};
pub use charts::ChartFigure;
pub use compose::{resolve, SlideView};
pub use kpi::KpiStrip;
pub use session::{DashboardSession, InputEvent};
