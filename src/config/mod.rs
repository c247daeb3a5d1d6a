//! Configuration module for the box-scope application.

pub mod analysis;

mod debug; // Can be private now because we have a public re-export. Forces files to use crate::config::DEBUG_FLAGS not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig, FeedSettings, LayoutSettings, LevelSettings};
