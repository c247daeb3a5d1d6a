use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::FeedSettings;
use crate::models::box_slice::BoxSlice;

/// On-disk fixture format for demo and replay feeds: per-pair slice
/// sequences, nothing more. Live transport serialization is the upstream
/// feed's concern, not ours.
#[derive(Debug, Serialize, Deserialize)]
pub struct SliceFeedFile {
    pub pairs: HashMap<String, Vec<BoxSlice>>,
}

/// Load a feed fixture and prepare it for replay.
///
/// Slices are sorted by timestamp per pair. The `abs(high-low) == abs(value)`
/// consistency invariant is checked here (the one place it is checked at
/// all) and violations are counted and logged, never rejected - the core
/// tolerates inconsistent boxes by contract.
pub fn read_slice_file(path: impl AsRef<Path>, feed: &FeedSettings) -> Result<SliceFeedFile> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open feed file {}", path.display()))?;
    let mut parsed: SliceFeedFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse feed file {}", path.display()))?;

    for slices in parsed.pairs.values_mut() {
        slices.sort_by_key(|s| s.timestamp_ms);
    }

    // Consistency audit across all pairs in parallel
    let epsilon = feed.consistency_epsilon;
    let violations: Vec<(String, usize)> = parsed
        .pairs
        .par_iter()
        .map(|(pair, slices)| {
            let count = slices
                .iter()
                .flat_map(|s| s.boxes.iter())
                .filter(|b| b.is_finite() && !b.is_consistent(epsilon))
                .count();
            (pair.clone(), count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    for (pair, count) in violations {
        #[cfg(debug_assertions)]
        if !DEBUG_FLAGS.print_slice_validation {
            continue;
        }
        log::warn!(
            "[{}] {} boxes violate the high/low-vs-value invariant (tolerated)",
            pair,
            count
        );
    }

    Ok(parsed)
}

/// Write a feed fixture (used by the demo generator).
pub fn write_slice_file(path: impl AsRef<Path>, feed_file: &SliceFeedFile) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create feed file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), feed_file)
        .with_context(|| format!("Failed to serialize feed file {}", path.display()))?;
    Ok(())
}
