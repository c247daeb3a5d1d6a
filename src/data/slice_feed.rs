use std::collections::HashMap;
use std::sync::Mutex;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::models::box_slice::{BoxSlice, SliceHistory};

/// In-process mailbox between the upstream box feed and the engine.
///
/// The transport that produces slices (websocket, replay file, tests) is an
/// external collaborator; this manager only owns the per-pair bounded
/// history buffers and hands out snapshots. Push updates arrive on whatever
/// thread the transport runs on, so everything sits behind one mutex.
pub struct SliceFeedManager {
    // Map of pair -> bounded recent history
    histories: Mutex<HashMap<String, SliceHistory>>,
    // Suspension flag - when true, incoming slices are ignored
    suspended: Mutex<bool>,
    // Capacity applied to newly created pair buffers
    history_capacity: usize,
}

impl SliceFeedManager {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            histories: Mutex::new(HashMap::new()),
            suspended: Mutex::new(false),
            history_capacity,
        }
    }

    /// Accept one slice from the upstream feed.
    /// Ignored while suspended (replay/simulation mode).
    pub fn push_slice(&self, pair: &str, slice: BoxSlice) {
        if self.is_suspended() {
            return;
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_feed_updates {
            log::info!(
                "[{}] slice @ {} with {} boxes",
                pair,
                slice.timestamp_display(),
                slice.boxes.len()
            );
        }

        let mut histories = self.histories.lock().unwrap();
        histories
            .entry(pair.to_string())
            .or_insert_with(|| SliceHistory::new(self.history_capacity))
            .push(slice);
    }

    /// Timestamp of the newest buffered slice for a pair.
    pub fn latest_timestamp_ms(&self, pair: &str) -> Option<i64> {
        self.histories
            .lock()
            .unwrap()
            .get(pair)
            .and_then(|h| h.latest_timestamp_ms())
    }

    /// Clone the buffered frames of a pair for a worker to crunch.
    pub fn snapshot(&self, pair: &str) -> Vec<BoxSlice> {
        self.histories
            .lock()
            .unwrap()
            .get(pair)
            .map(|h| h.snapshot())
            .unwrap_or_default()
    }

    pub fn frame_count(&self, pair: &str) -> usize {
        self.histories
            .lock()
            .unwrap()
            .get(pair)
            .map(|h| h.len())
            .unwrap_or(0)
    }

    /// All pairs that have delivered at least one slice.
    pub fn pair_names(&self) -> Vec<String> {
        self.histories.lock().unwrap().keys().cloned().collect()
    }

    /// Suspend feed intake (for simulation mode)
    pub fn suspend(&self) {
        *self.suspended.lock().unwrap() = true;
    }

    /// Resume feed intake (exit simulation mode)
    pub fn resume(&self) {
        *self.suspended.lock().unwrap() = false;
    }

    pub fn is_suspended(&self) -> bool {
        *self.suspended.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatternBox;

    fn slice_at(ts: i64) -> BoxSlice {
        BoxSlice::new(ts, vec![PatternBox::new(1.0, 0.0, 1.0)])
    }

    #[test]
    fn test_push_and_snapshot() {
        let feed = SliceFeedManager::new(8);
        feed.push_slice("EURUSD", slice_at(1));
        feed.push_slice("EURUSD", slice_at(2));
        feed.push_slice("GBPUSD", slice_at(5));

        assert_eq!(feed.latest_timestamp_ms("EURUSD"), Some(2));
        assert_eq!(feed.snapshot("EURUSD").len(), 2);
        assert_eq!(feed.frame_count("GBPUSD"), 1);
        assert!(feed.snapshot("USDJPY").is_empty(), "unknown pair yields empty");

        let mut pairs = feed.pair_names();
        pairs.sort();
        assert_eq!(pairs, vec!["EURUSD".to_string(), "GBPUSD".to_string()]);
    }

    #[test]
    fn test_suspension_drops_updates() {
        let feed = SliceFeedManager::new(8);
        feed.push_slice("EURUSD", slice_at(1));
        feed.suspend();
        feed.push_slice("EURUSD", slice_at(2));
        assert_eq!(feed.latest_timestamp_ms("EURUSD"), Some(1));
        feed.resume();
        feed.push_slice("EURUSD", slice_at(3));
        assert_eq!(feed.latest_timestamp_ms("EURUSD"), Some(3));
    }
}
