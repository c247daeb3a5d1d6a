use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::PatternBox;
use crate::utils::time_utils::epoch_ms_to_utc;

// ============================================================================
// BoxSlice: the full set of boxes for one timestamp
// ============================================================================

/// An ordered list of boxes at a single timestamp, outermost-to-innermost.
/// Produced upstream at a fixed cadence and immutable once created;
/// consumers derive new structures from it, they never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSlice {
    pub timestamp_ms: i64,
    pub boxes: Vec<PatternBox>,
}

impl BoxSlice {
    pub fn new(timestamp_ms: i64, boxes: Vec<PatternBox>) -> Self {
        Self { timestamp_ms, boxes }
    }

    /// Display string for logs and reports (UTC).
    pub fn timestamp_display(&self) -> String {
        epoch_ms_to_utc(self.timestamp_ms)
    }
}

// ============================================================================
// SliceHistory: bounded recent-history buffer for one pair
// ============================================================================

/// Rolling buffer of the most recent slices for a single pair.
/// Level polylines are re-derived from this buffer rather than from an
/// unbounded log, which keeps memory flat no matter how long the feed runs.
#[derive(Debug, Clone)]
pub struct SliceHistory {
    frames: VecDeque<BoxSlice>,
    max_frames: usize,
}

impl SliceHistory {
    pub fn new(max_frames: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(max_frames.min(1024)),
            max_frames: max_frames.max(1),
        }
    }

    /// Append a slice, evicting the oldest frame once the buffer is full.
    pub fn push(&mut self, slice: BoxSlice) {
        if self.frames.len() == self.max_frames {
            self.frames.pop_front();
        }
        self.frames.push_back(slice);
    }

    pub fn latest_timestamp_ms(&self) -> Option<i64> {
        self.frames.back().map(|s| s.timestamp_ms)
    }

    /// Snapshot of the buffered frames in arrival order.
    /// Cloned so workers can crunch it without holding any lock.
    pub fn snapshot(&self) -> Vec<BoxSlice> {
        self.frames.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
