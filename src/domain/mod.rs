// Domain types and value objects
pub mod box_measure;
pub mod timeframe;

// Re-export commonly used types
pub use box_measure::{BoxDirection, PatternBox};
pub use timeframe::{TimeframeSettings, visible_window};
