//! egui components for the coindeck dashboard
//!
//! The sidebar slide menu, the shell header/footer and the theme.

pub mod shell;
pub mod sidebar;
pub mod theme;

pub use shell::{footer, header_bar};
pub use sidebar::SidebarPanel;
pub use theme::{apply_theme, Theme};
