#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod utils;

// The engine
pub mod engine;

// Re-export commonly used types
pub use analysis::{BoxCorner, PositionedBox, layout_boxes, normalize, track_levels};
pub use data::{SliceFeedManager, read_slice_file, write_slice_file};
pub use domain::{BoxDirection, PatternBox, TimeframeSettings, visible_window};
pub use engine::PatternEngine;
pub use models::{BoxSlice, LevelPoint, LevelTrend, PatternModel};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the slice feed fixture to replay (JSON)
    #[arg(long, default_value = "demo_feed.json")]
    pub feed_file: String,

    /// Drawing width the level polylines are rescaled to in the report
    #[arg(long, default_value_t = 600.0)]
    pub draw_width: f64,

    /// Override the level tracker's boundary tolerance ratio
    #[arg(long)]
    pub tolerance_ratio: Option<f64>,

    /// Override the visible window size (number of boxes)
    #[arg(long)]
    pub max_box_count: Option<usize>,
}
