use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Instant;

use crate::models::pattern_view::PatternModel;

use super::messages::{JobRequest, JobResult};

/// Spawn the background worker that turns frame snapshots into models.
/// One worker is enough: each job is a pure function over its snapshot and
/// the queue serializes pairs anyway.
pub fn spawn_worker_thread(rx: Receiver<JobRequest>, tx: Sender<JobResult>) {
    thread::spawn(move || {
        while let Ok(req) = rx.recv() {
            let start = Instant::now();

            let computed =
                PatternModel::from_frames(req.pair_name.clone(), &req.frames, &req.config);

            let elapsed = start.elapsed().as_millis();

            let result = JobResult {
                pair_name: req.pair_name,
                duration_ms: elapsed,
                result: computed.map(Arc::new).map_err(|e| e.to_string()),
            };

            // If the receiver is gone the engine is shutting down; stop quietly.
            if tx.send(result).is_err() {
                break;
            }
        }
    });
}
