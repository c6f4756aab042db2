//! Navigation subscriber trait

use super::NavigationContext;

/// Trait for components that need to respond to navigation changes
pub trait NavigationSubscriber: Send + Sync {
    /// Called after every accepted navigation or selection mutation
    fn on_navigation_change(&self, context: &NavigationContext);
}
