use serde::{Deserialize, Serialize};

use crate::domain::box_measure::PatternBox;

/// User-configurable window over a slice's box list.
/// Defines the half-open range `[start_index, start_index + max_box_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeSettings {
    pub start_index: usize,
    pub max_box_count: usize,
}

impl TimeframeSettings {
    pub fn new(start_index: usize, max_box_count: usize) -> Self {
        Self {
            start_index,
            max_box_count,
        }
    }
}

/// Select the visible window of a box list.
///
/// Both ends are clamped to the list length, so an out-of-range window yields
/// an empty or truncated result, never an error. Every visualization of the
/// same underlying slice must go through this one function so that the k-th
/// visible box always refers to the same rank everywhere.
pub fn visible_window<'a>(
    boxes: &'a [PatternBox],
    settings: &TimeframeSettings,
) -> &'a [PatternBox] {
    let start = settings.start_index.min(boxes.len());
    let end = start
        .saturating_add(settings.max_box_count)
        .min(boxes.len());
    &boxes[start..end]
}
