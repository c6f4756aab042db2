//! Slide navigation engine

use super::{NavigationContext, NavigationError, NavigationSubscriber, StepDirection};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Navigation state stored internally
#[derive(Debug, Clone)]
struct NavigationState {
    slide_index: usize,
    selected_entity: String,
    slide_count: usize,
}

/// The slide navigation engine
///
/// Holds the (slide index, selected entity) pair and serializes every
/// mutation through the two operations the dashboard exposes: stepping
/// with wraparound and jumping to an explicit catalog position.
pub struct NavigationEngine {
    state: Arc<RwLock<NavigationState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn NavigationSubscriber>>>>,
}

impl NavigationEngine {
    /// Create an engine over a catalog of `slide_count` slides
    pub fn new(slide_count: usize, default_entity: impl Into<String>) -> Self {
        let state = NavigationState {
            slide_index: 0,
            selected_entity: default_entity.into(),
            slide_count,
        };

        Self {
            state: Arc::new(RwLock::new(state)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Jump to an explicit slide index (from the sidebar menu)
    ///
    /// The menu is generated from the catalog, but this is a public
    /// operation, so an out-of-range index fails instead of clamping.
    pub fn jump(&self, index: usize) -> Result<(), NavigationError> {
        let mut state = self.state.write();
        if index >= state.slide_count {
            return Err(NavigationError::OutOfRange {
                index,
                len: state.slide_count,
            });
        }
        state.slide_index = index;
        drop(state);
        self.notify_subscribers();
        Ok(())
    }

    /// Step one slide in either direction, wrapping at both ends
    pub fn step(&self, direction: StepDirection) {
        let mut state = self.state.write();
        let n = state.slide_count;
        if n == 0 {
            return;
        }
        let idx = state.slide_index as isize + direction.offset();
        state.slide_index = idx.rem_euclid(n as isize) as usize;
        drop(state);
        self.notify_subscribers();
    }

    /// Advance to the next slide (wraps to the first past the last)
    pub fn next(&self) {
        self.step(StepDirection::Forward);
    }

    /// Go back one slide (wraps to the last before the first)
    pub fn previous(&self) {
        self.step(StepDirection::Backward);
    }

    /// Select the entity driving parametric slides
    ///
    /// An empty id is a no-op: it must never clear a prior valid selection.
    pub fn select_entity(&self, id: &str) {
        if id.is_empty() {
            return;
        }
        let mut state = self.state.write();
        if state.selected_entity == id {
            return;
        }
        state.selected_entity = id.to_string();
        drop(state);
        self.notify_subscribers();
    }

    /// Get the current navigation context
    pub fn context(&self) -> NavigationContext {
        let state = self.state.read();
        NavigationContext {
            slide_index: state.slide_index,
            selected_entity: state.selected_entity.clone(),
            slide_count: state.slide_count,
        }
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn NavigationSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Notify all subscribers of a state change
    fn notify_subscribers(&self) {
        let context = self.context();
        debug!(
            slide_index = context.slide_index,
            entity = %context.selected_entity,
            "navigation state changed"
        );
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_navigation_change(&context);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_step_wraps_forward() {
        let engine = NavigationEngine::new(10, "bitcoin");
        engine.jump(9).unwrap();
        engine.next();
        assert_eq!(engine.context().slide_index, 0);
    }

    #[test]
    fn test_step_wraps_backward() {
        let engine = NavigationEngine::new(10, "bitcoin");
        assert_eq!(engine.context().slide_index, 0);
        engine.previous();
        assert_eq!(engine.context().slide_index, 9);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        for direction in [StepDirection::Forward, StepDirection::Backward] {
            for start in [0usize, 3, 9] {
                let engine = NavigationEngine::new(10, "bitcoin");
                engine.jump(start).unwrap();
                for _ in 0..10 {
                    engine.step(direction);
                }
                assert_eq!(engine.context().slide_index, start);
            }
        }
    }

    #[test]
    fn test_step_back_then_forward_is_identity() {
        let engine = NavigationEngine::new(10, "bitcoin");
        engine.jump(4).unwrap();
        engine.previous();
        engine.next();
        assert_eq!(engine.context().slide_index, 4);
        engine.next();
        engine.previous();
        assert_eq!(engine.context().slide_index, 4);
    }

    #[test]
    fn test_jump_in_range() {
        let engine = NavigationEngine::new(10, "bitcoin");
        engine.jump(3).unwrap();
        assert_eq!(engine.context().slide_index, 3);
    }

    #[test]
    fn test_jump_out_of_range() {
        let engine = NavigationEngine::new(10, "bitcoin");
        let err = engine.jump(10).unwrap_err();
        assert_eq!(err, NavigationError::OutOfRange { index: 10, len: 10 });
        // State untouched
        assert_eq!(engine.context().slide_index, 0);
    }

    #[test]
    fn test_select_entity() {
        let engine = NavigationEngine::new(10, "bitcoin");
        engine.select_entity("ethereum");
        assert_eq!(engine.context().selected_entity, "ethereum");
    }

    #[test]
    fn test_select_empty_entity_is_noop() {
        let engine = NavigationEngine::new(10, "bitcoin");
        engine.select_entity("ethereum");
        engine.select_entity("");
        assert_eq!(engine.context().selected_entity, "ethereum");
    }

    #[test]
    fn test_empty_catalog_step_is_noop() {
        let engine = NavigationEngine::new(0, "bitcoin");
        engine.next();
        engine.previous();
        assert_eq!(engine.context().slide_index, 0);
    }

    struct CountingSubscriber(AtomicUsize);

    impl NavigationSubscriber for CountingSubscriber {
        fn on_navigation_change(&self, _context: &NavigationContext) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_subscribers_notified_on_every_mutation() {
        let engine = NavigationEngine::new(10, "bitcoin");
        let subscriber = Arc::new(CountingSubscriber(AtomicUsize::new(0)));
        engine.add_subscriber(subscriber.clone());

        engine.next();
        engine.jump(5).unwrap();
        engine.select_entity("solana");
        // No-ops do not notify
        engine.select_entity("");
        let _ = engine.jump(99);

        assert_eq!(subscriber.0.load(Ordering::SeqCst), 3);
    }
}
