// Analysis algorithms: normalization, layout geometry, level extraction
pub mod box_normalizer;
pub mod level_monitor;
pub mod level_tracker;
pub mod nested_layout;

// Re-export commonly used items
pub use box_normalizer::normalize;
pub use level_monitor::{LevelMonitor, LevelSignal};
pub use level_tracker::track_levels;
pub use nested_layout::{BoxCorner, PositionedBox, layout_boxes};
