use serde::{Deserialize, Serialize};
use thiserror::Error;

mod engine;
mod subscriber;

pub use engine::NavigationEngine;
pub use subscriber::NavigationSubscriber;

/// Direction of a relative slide step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepDirection {
    /// Towards the previous slide
    Backward,
    /// Towards the next slide
    Forward,
}

impl StepDirection {
    /// Signed offset applied to the slide index
    pub fn offset(self) -> isize {
        match self {
            StepDirection::Backward => -1,
            StepDirection::Forward => 1,
        }
    }
}

/// Errors from public navigation operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("slide index {index} out of range (catalog has {len} slides)")]
    OutOfRange { index: usize, len: usize },
}

/// Snapshot of navigation state passed to subscribers and the view composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    /// Current slide, 0-based position in the catalog
    pub slide_index: usize,
    /// Currently selected entity id (coin id)
    pub selected_entity: String,
    /// Catalog length the index wraps against
    pub slide_count: usize,
}
