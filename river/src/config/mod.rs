//! Configuration objects for feed pipelines.
//!
//! Re-exports the configuration types required to set up and run a feed.

// Re-exports.
pub use river_config::shared::*;
