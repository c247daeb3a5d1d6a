//! Generates a deterministic synthetic slice feed for the demo report.
//!
//! Each pair gets a slow sinusoidal drift with a faster wobble layered on
//! top; every timestamp carries a stack of nested boxes whose magnitudes
//! shrink geometrically and whose signs follow the local drift direction.
//! No randomness, so the demo output is reproducible.

use std::collections::HashMap;

use anyhow::Result;

use box_scope::data::{SliceFeedFile, write_slice_file};
use box_scope::models::BoxSlice;
use box_scope::utils::TimeUtils;
use box_scope::PatternBox;

const OUTPUT_PATH: &str = "demo_feed.json";
const FRAMES_PER_PAIR: usize = 60;
const BOXES_PER_SLICE: usize = 10;
const SHRINK_RATIO: f64 = 0.75;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut pairs = HashMap::new();
    pairs.insert("EURUSD".to_string(), synth_pair(1.2000, 0.0200, 0.7));
    pairs.insert("GBPUSD".to_string(), synth_pair(1.3100, 0.0300, 1.3));
    pairs.insert("USDJPY".to_string(), synth_pair(148.50, 1.8000, 0.4));

    let feed_file = SliceFeedFile { pairs };
    write_slice_file(OUTPUT_PATH, &feed_file)?;

    log::info!(
        "Wrote {} pairs x {} frames to {}",
        feed_file.pairs.len(),
        FRAMES_PER_PAIR,
        OUTPUT_PATH
    );
    Ok(())
}

/// Build one pair's frame sequence around `anchor` with the given outermost
/// box size and drift frequency.
fn synth_pair(anchor: f64, outer_size: f64, frequency: f64) -> Vec<BoxSlice> {
    (0..FRAMES_PER_PAIR)
        .map(|i| {
            let t = i as f64;
            let drift = (t * 0.1 * frequency).sin() * outer_size * 0.5;
            let center = anchor + drift;

            let boxes = (0..BOXES_PER_SLICE)
                .map(|depth| {
                    let size = outer_size * SHRINK_RATIO.powi(depth as i32);
                    // Faster wobble deeper in the stack so directions mix
                    let phase = t * 0.45 * frequency + depth as f64 * 0.9;
                    let bullish = phase.sin() >= 0.0;
                    let half = size / 2.0;
                    let value = if bullish { size } else { -size };
                    PatternBox::new(center + half, center - half, value)
                })
                .collect();

            BoxSlice::new(i as i64 * TimeUtils::MS_IN_MIN, boxes)
        })
        .collect()
}
