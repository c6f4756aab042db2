//! Sidebar layout state

use parking_lot::RwLock;

/// Sidebar visibility toggle
///
/// Purely presentational and independent of navigation: collapsing the
/// sidebar never changes which slide is shown.
pub struct LayoutState {
    sidebar_visible: RwLock<bool>,
}

impl LayoutState {
    /// Create layout state with the sidebar expanded
    pub fn new() -> Self {
        Self {
            sidebar_visible: RwLock::new(true),
        }
    }

    /// Flip sidebar visibility, returning the new value
    pub fn toggle_sidebar(&self) -> bool {
        let mut visible = self.sidebar_visible.write();
        *visible = !*visible;
        *visible
    }

    /// Whether the sidebar is currently shown
    pub fn sidebar_visible(&self) -> bool {
        *self.sidebar_visible.read()
    }
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_starts_visible() {
        assert!(LayoutState::new().sidebar_visible());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let layout = LayoutState::new();
        let before = layout.sidebar_visible();
        assert_eq!(layout.toggle_sidebar(), !before);
        assert_eq!(layout.toggle_sidebar(), before);
        assert_eq!(layout.sidebar_visible(), before);
    }
}
