use std::sync::Arc;

use crate::config::AnalysisConfig;
use crate::models::box_slice::BoxSlice;
use crate::models::pattern_view::PatternModel;

/// A request to recompute the model for a specific pair
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub pair_name: String,
    // Snapshot of the pair's buffered frames at dispatch time; the worker
    // never touches the live feed buffers
    pub frames: Vec<BoxSlice>,
    pub config: AnalysisConfig,
}

/// The result returned by the worker
#[derive(Debug, Clone)]
pub struct JobResult {
    pub pair_name: String,
    pub duration_ms: u128,

    // Success: The new Front Buffer
    // Failure: The error string
    pub result: Result<Arc<PatternModel>, String>,
}
