//! Shared chart helpers

pub mod colors;
pub mod stats;
