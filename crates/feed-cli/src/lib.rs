//! CLI library components for the feed generator.

pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
