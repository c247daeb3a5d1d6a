use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use box_scope::analysis::BoxCorner;
use box_scope::config::ANALYSIS;
use box_scope::engine::PatternEngine;
use box_scope::models::LevelTrend;
use box_scope::utils::time_utils::epoch_ms_to_utc;
use box_scope::{Cli, SliceFeedManager, read_slice_file};

fn main() -> Result<()> {
    // A. Init logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Config overrides from the CLI
    let mut config = ANALYSIS.clone();
    if let Some(tolerance) = args.tolerance_ratio {
        config.level.tolerance_ratio = tolerance;
    }
    if let Some(count) = args.max_box_count {
        config.timeframe.max_box_count = count.max(1);
    }

    // D. Load and replay the fixture feed
    let feed_file = read_slice_file(&args.feed_file, &config.feed)?;
    let feed = Arc::new(SliceFeedManager::new(config.feed.history_capacity));

    let mut engine = PatternEngine::new(feed.clone());
    engine.update_config(config);

    let mut total_slices = 0usize;
    for (pair, slices) in feed_file.pairs {
        total_slices += slices.len();
        for slice in slices {
            feed.push_slice(&pair, slice);
        }
    }
    log::info!(
        "Replayed {} slices across {} pairs from {}",
        total_slices,
        feed.pair_names().len(),
        args.feed_file
    );

    // E. Drive the engine to quiescence
    while engine.update() {
        thread::sleep(Duration::from_millis(2));
    }

    // F. Report
    for pair in engine.get_all_pair_names() {
        print_pair_report(&engine, &pair, args.draw_width);
    }

    let signals = engine.get_signals();
    if !signals.is_empty() {
        println!("\nSignals:");
        for signal in signals {
            println!("  {:?}", signal);
        }
    }

    Ok(())
}

fn print_pair_report(engine: &PatternEngine, pair: &str, draw_width: f64) {
    println!("\n=== {} ===", pair);

    let (_, last_error) = engine.get_pair_status(pair);
    if let Some(err) = last_error {
        println!("  error: {}", err);
        return;
    }

    let Some(model) = engine.get_model(pair) else {
        println!("  (no model computed)");
        return;
    };

    println!("  newest slice: {}", epoch_ms_to_utc(model.timestamp_ms));

    println!("  layout ({} boxes):", model.layout.len());
    for positioned in &model.layout {
        let corner = match positioned.corner {
            BoxCorner::TopRight => "top-right",
            BoxCorner::BottomRight => "bottom-right",
        };
        println!(
            "  {}{:8.2}px {:12} {}{}",
            "  ".repeat(positioned.depth + 1),
            positioned.size_px,
            corner,
            format_bounds(positioned.box_measure.high, positioned.box_measure.low),
            if positioned.emphasis { "  *" } else { "" }
        );
    }

    if model.level.is_empty() {
        println!("  level: (no trend yet)");
        return;
    }

    let widths = model.level_widths_for(draw_width);
    let trends = model.level_trends();
    println!("  level ({} points over {:.0}px):", model.level.len(), draw_width);
    for (i, point) in model.level.iter().enumerate() {
        let glyph = if i == 0 {
            ' '
        } else {
            match trends[i - 1] {
                LevelTrend::Rising => '/',
                LevelTrend::Falling => '\\',
            }
        };
        println!(
            "    {} x={:7.1}  {}  (rank {}, frame {})",
            glyph,
            widths[i],
            format_bounds(point.high, point.low),
            point.source_box_index,
            point.frame_index
        );
    }
}

fn format_bounds(high: f64, low: f64) -> String {
    format!("[{:.5} .. {:.5}]", low, high)
}
