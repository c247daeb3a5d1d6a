use std::sync::Arc;

use crate::models::pattern_view::PatternModel;

/// Represents the state of a single pair in the engine.
#[derive(Debug, Clone)]
pub struct PairState {
    /// THE FRONT BUFFER.
    /// The consumer reads this every frame; it is never locked for writing.
    /// When a new model is ready, we simply replace this Arc pointer.
    pub model: Option<Arc<PatternModel>>,

    /// Timestamp of the newest slice covered by the dispatched/completed
    /// model; the trigger system compares the feed against this.
    pub last_update_ts: i64,

    /// Is the worker currently crunching this pair?
    pub is_calculating: bool,

    /// Last error (if any) to surface to the caller
    pub last_error: Option<String>,
}

impl PairState {
    pub fn new() -> Self {
        Self {
            model: None,
            last_update_ts: i64::MIN,
            is_calculating: false,
            last_error: None,
        }
    }

    /// The "Swap" operation.
    /// Promotes the freshly computed model to the front buffer. Overwriting
    /// the Arc drops the superseded model - last write wins.
    pub fn update_buffer(&mut self, new_model: Arc<PatternModel>) {
        self.last_update_ts = new_model.timestamp_ms;
        self.model = Some(new_model);
        self.is_calculating = false;
        self.last_error = None;
    }
}

impl Default for PairState {
    fn default() -> Self {
        Self::new()
    }
}
