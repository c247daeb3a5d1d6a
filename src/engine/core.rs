use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use crate::analysis::{LevelMonitor, LevelSignal};
use crate::config::{ANALYSIS, AnalysisConfig};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::slice_feed::SliceFeedManager;
use crate::models::pattern_view::PatternModel;

use super::messages::{JobRequest, JobResult};
use super::state::PairState;
use super::worker;

/// The calling layer the pure core leaves concurrency to: watches the feed,
/// queues recomputation jobs, swaps finished models into per-pair front
/// buffers, and feeds the level monitor.
pub struct PatternEngine {
    /// Registry of all pairs
    pub pairs: HashMap<String, PairState>,

    /// Live data feed (shared with the transport pushing slices in)
    pub feed: Arc<SliceFeedManager>,

    /// Owned monitor
    pub level_monitor: LevelMonitor,

    /// Worker communication
    job_tx: Sender<JobRequest>,
    result_rx: Receiver<JobResult>,

    /// Queue logic
    pub queue: VecDeque<String>,

    /// The live configuration state
    pub current_config: AnalysisConfig,
}

impl PatternEngine {
    /// Initialize the engine and spawn the worker.
    pub fn new(feed: Arc<SliceFeedManager>) -> Self {
        let (job_tx, job_rx) = channel::<JobRequest>();
        let (result_tx, result_rx) = channel::<JobResult>();

        worker::spawn_worker_thread(job_rx, result_tx);

        let mut pairs = HashMap::new();
        for pair in feed.pair_names() {
            pairs.insert(pair, PairState::new());
        }

        Self {
            pairs,
            feed,
            level_monitor: LevelMonitor::new(),
            job_tx,
            result_rx,
            queue: VecDeque::new(),
            current_config: ANALYSIS.clone(),
        }
    }

    /// THE GAME LOOP.
    /// Returns TRUE if the engine is busy (queue not empty OR the worker
    /// still calculating), which tells the caller to keep ticking.
    pub fn update(&mut self) -> bool {
        // 1. Process results (swap buffers)
        while let Ok(result) = self.result_rx.try_recv() {
            self.handle_job_result(result);
        }

        // 2. Check triggers (new slices in the feed)
        self.check_automatic_triggers();

        // 3. Dispatch jobs
        self.process_queue();

        // 4. Report busy status
        !self.queue.is_empty() || self.has_active_workers()
    }

    /// Accessor for the rendering layer
    pub fn get_model(&self, pair: &str) -> Option<Arc<PatternModel>> {
        self.pairs.get(pair).and_then(|state| state.model.clone())
    }

    pub fn get_signals(&self) -> &[LevelSignal] {
        self.level_monitor.get_signals()
    }

    pub fn get_all_pair_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.pairs.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn set_feed_suspended(&self, suspended: bool) {
        if suspended {
            self.feed.suspend();
        } else {
            self.feed.resume();
        }
    }

    // --- TELEMETRY ---

    pub fn get_queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn get_worker_status_msg(&self) -> Option<String> {
        let calculating_pair = self
            .pairs
            .iter()
            .find(|(_, state)| state.is_calculating)
            .map(|(name, _)| name.clone());

        if let Some(pair) = calculating_pair {
            Some(format!("Processing {}", pair))
        } else if !self.queue.is_empty() {
            Some(format!("Queued: {}", self.queue.len()))
        } else {
            None
        }
    }

    pub fn get_active_pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn get_pair_status(&self, pair: &str) -> (bool, Option<String>) {
        if let Some(state) = self.pairs.get(pair) {
            (state.is_calculating, state.last_error.clone())
        } else {
            (false, None)
        }
    }

    // --- CONFIG UPDATES ---

    pub fn update_config(&mut self, new_config: AnalysisConfig) {
        self.current_config = new_config;
    }

    /// Smart global invalidation (e.g. the window or tolerance changed).
    /// Clears the queue, re-queues every pair, prioritizes the selected one.
    pub fn trigger_global_recalc(&mut self, priority_pair: Option<String>) {
        // 1. Clear existing queue (don't process stale jobs)
        self.queue.clear();

        // 2. Identify pairs
        let mut all_pairs = self.get_all_pair_names();

        // 3. Handle priority
        if let Some(vip) = priority_pair {
            if let Some(pos) = all_pairs.iter().position(|p| p == &vip) {
                all_pairs.remove(pos);
            }
            self.queue.push_back(vip);
        }

        // 4. Push the rest
        for pair in all_pairs {
            self.queue.push_back(pair);
        }

        log::info!(
            "Global invalidation: queue rebuilt ({} pairs). Head: {:?}",
            self.queue.len(),
            self.queue.front()
        );
    }

    /// Force a single recalc (e.g. user click).
    /// Checks for duplicates before adding.
    pub fn force_recalc(&mut self, pair: &str) {
        let is_calculating = self
            .pairs
            .get(pair)
            .map(|s| s.is_calculating)
            .unwrap_or(false);
        let in_queue = self.queue.contains(&pair.to_string());

        if !is_calculating && !in_queue {
            // Priority: front of queue
            self.queue.push_front(pair.to_string());
        }
    }

    // --- INTERNAL LOGIC ---

    fn has_active_workers(&self) -> bool {
        self.pairs.values().any(|s| s.is_calculating)
    }

    fn handle_job_result(&mut self, result: JobResult) {
        if let Some(state) = self.pairs.get_mut(&result.pair_name) {
            match result.result {
                Ok(model) => {
                    state.update_buffer(model.clone());
                    if let Some(signal) = self.level_monitor.observe(&model) {
                        log::info!("Signal: {:?} ({} ms compute)", signal, result.duration_ms);
                    }
                }
                Err(e) => {
                    log::error!("Worker failed for {}: {}", result.pair_name, e);
                    state.last_error = Some(e);
                    state.is_calculating = false;
                }
            }
        }
    }

    fn check_automatic_triggers(&mut self) {
        // Pick up pairs that appeared in the feed after engine construction
        for pair in self.feed.pair_names() {
            self.pairs.entry(pair).or_default();
        }

        let pairs: Vec<String> = self.pairs.keys().cloned().collect();

        for pair in pairs {
            if let Some(latest_ts) = self.feed.latest_timestamp_ms(&pair)
                && let Some(state) = self.pairs.get_mut(&pair)
            {
                // Don't queue if already busy or already queued
                if state.is_calculating || self.queue.contains(&pair) {
                    continue;
                }

                if latest_ts > state.last_update_ts {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_engine_triggers {
                        log::info!(
                            "[{}] Trigger: new slice {} > {}",
                            pair,
                            latest_ts,
                            state.last_update_ts
                        );
                    }
                    self.queue.push_back(pair);
                }
            }
        }
    }

    fn process_queue(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        // Peek at front: is it calculating right now? Single worker, so wait.
        if let Some(pair) = self.queue.front()
            && let Some(state) = self.pairs.get(pair)
            && state.is_calculating
        {
            return;
        }

        if let Some(pair) = self.queue.pop_front() {
            self.dispatch_job(pair);
        }
    }

    fn dispatch_job(&mut self, pair: String) {
        if let Some(state) = self.pairs.get_mut(&pair) {
            let frames = self.feed.snapshot(&pair);

            // STRICT LOGIC: only proceed if the feed actually has frames.
            if let Some(newest) = frames.last() {
                state.is_calculating = true;
                state.last_update_ts = newest.timestamp_ms;

                let req = JobRequest {
                    pair_name: pair,
                    frames,
                    config: self.current_config.clone(),
                };

                // Send to worker. If receiver is dead, we ignore the error
                // (engine shutting down).
                let _ = self.job_tx.send(req);
            } else {
                // No frames yet (feed still connecting). Do nothing; the
                // trigger loop picks this pair up once slices arrive.
            }
        }
    }
}
