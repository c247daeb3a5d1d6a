// Domain models for box pattern analysis
// These modules contain pure business logic independent of UI/visualization

pub mod box_slice;
pub mod level;
pub mod pattern_view;

// Re-export key types for convenience
pub use box_slice::{BoxSlice, SliceHistory};
pub use level::{LevelPoint, LevelTrend, segment_trend};
pub use pattern_view::PatternModel;
