use serde::{Deserialize, Serialize};

/// One breakpoint of the de-noised level line.
///
/// `cumulative_width` is measured in abstract boundary-distance units, not
/// pixels; the caller rescales the whole polyline to its drawing width. The
/// sequence grows monotonically as frames arrive and is re-derived from a
/// bounded recent-history buffer, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelPoint {
    pub cumulative_width: f64,
    pub high: f64,
    pub low: f64,
    pub value: f64,
    /// Rank of the dominant box inside its windowed frame. Carried forward
    /// from the previous accepted point when a boundary shifts, because the
    /// level is still conceptually the same structural rank.
    pub source_box_index: usize,
    /// Index into the caller's original frame sequence.
    pub frame_index: usize,
}

/// Direction of one `[point, next_point]` segment, used by renderers to pick
/// the segment colour. Flat counts as rising.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelTrend {
    Rising,
    Falling,
}

/// Classify a level segment by the sign of the `high` delta.
pub fn segment_trend(from: &LevelPoint, to: &LevelPoint) -> LevelTrend {
    if to.high < from.high {
        LevelTrend::Falling
    } else {
        LevelTrend::Rising
    }
}
