//! Analysis and computation configuration

use crate::domain::TimeframeSettings;
use crate::utils::TimeUtils;

/// Settings for the level tracker (boundary de-noising)
#[derive(Debug, Clone)]
pub struct LevelSettings {
    // Relative tolerance: a boundary must move at least
    // size * tolerance_ratio before a new level point is accepted
    pub tolerance_ratio: f64,
    // Recency horizon: frames older than this (relative to the newest
    // frame) are discarded before tracking
    pub horizon_ms: i64,
}

/// Settings for the nested layout geometry
#[derive(Debug, Clone)]
pub struct LayoutSettings {
    // Pixel size of the outermost box; everything nests inside it
    pub base_pixel_size: f64,
}

/// Settings for the slice feed history buffers
#[derive(Debug, Clone)]
pub struct FeedSettings {
    // Maximum frames retained per pair (bounded recent-history buffer)
    pub history_capacity: usize,
    // Tolerance when checking the abs(high-low) == abs(value) invariant
    // at the feed boundary. Violations are logged, never rejected.
    pub consistency_epsilon: f64,
}

/// The Master Analysis Configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // The default visible window applied to every slice
    pub timeframe: TimeframeSettings,

    // Sub-groups
    pub layout: LayoutSettings,
    pub level: LevelSettings,
    pub feed: FeedSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    timeframe: TimeframeSettings {
        start_index: 0,
        max_box_count: 8,
    },

    layout: LayoutSettings {
        base_pixel_size: 250.0,
    },

    level: LevelSettings {
        tolerance_ratio: 0.05,
        // Half an hour of history is plenty: the level line is meant to
        // describe the current structure, not the whole session
        horizon_ms: TimeUtils::MS_IN_30_MIN,
    },

    feed: FeedSettings {
        history_capacity: 256,
        consistency_epsilon: 1e-6,
    },
};
