use crate::analysis::box_normalizer::normalize;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::LevelSettings;
use crate::domain::{PatternBox, TimeframeSettings, visible_window};
use crate::models::box_slice::BoxSlice;
use crate::models::level::LevelPoint;
use crate::utils::maths_utils::argmin_value;

/// Compress a noisy time series of dominant-box boundaries into a simplified
/// step-line (support/resistance style level extraction).
///
/// Frames older than the recency horizon (relative to the newest frame) are
/// discarded; frames whose windowed box list comes up empty are skipped
/// entirely. Fewer than two usable frames means "no trend yet" and yields an
/// empty result.
///
/// The first usable frame seeds the line at cumulative width 0. Each later
/// frame contributes a point only when its dominant box's high or low moved
/// at least `size * tolerance_ratio` away from the last accepted point;
/// everything else is absorbed as noise. Accepted points advance the width
/// by the larger boundary move and inherit the previous point's rank.
pub fn track_levels(
    frames: &[BoxSlice],
    window: &TimeframeSettings,
    settings: &LevelSettings,
) -> Vec<LevelPoint> {
    let Some(newest_ts) = frames.iter().map(|f| f.timestamp_ms).max() else {
        return Vec::new();
    };
    let oldest_allowed = newest_ts - settings.horizon_ms;

    // Dominant box of every usable frame, in arrival order
    let mut dominants: Vec<(usize, PatternBox)> = Vec::new();
    for (frame_index, frame) in frames.iter().enumerate() {
        if frame.timestamp_ms < oldest_allowed {
            continue;
        }
        if let Some(dominant) = select_dominant(&frame.boxes, window) {
            dominants.push((frame_index, dominant));
        }
    }

    if dominants.len() < 2 {
        // Insufficient history: not an error, simply no trend yet
        return Vec::new();
    }

    let (seed_frame, seed_box) = &dominants[0];
    let mut last = LevelPoint {
        cumulative_width: 0.0,
        high: seed_box.high,
        low: seed_box.low,
        value: seed_box.value,
        source_box_index: seed_box.box_index.unwrap_or(0),
        frame_index: *seed_frame,
    };

    let mut level = vec![last.clone()];

    for (frame_index, dominant) in dominants.iter().skip(1) {
        let size = dominant.size();
        let high_move = (dominant.high - last.high).abs();
        let low_move = (dominant.low - last.low).abs();
        let threshold = size * settings.tolerance_ratio;
        let moved = high_move.max(low_move);

        // The extra moved > 0.0 check keeps cumulative width strictly
        // increasing when size degenerates to zero and the threshold
        // collapses with it
        let accepted = (high_move >= threshold || low_move >= threshold) && moved > 0.0;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_level_events {
            log::info!(
                "frame {}: high_move {:.6} low_move {:.6} threshold {:.6} -> {}",
                frame_index,
                high_move,
                low_move,
                threshold,
                if accepted { "ACCEPT" } else { "absorb" }
            );
        }

        if accepted {
            let point = LevelPoint {
                cumulative_width: last.cumulative_width + moved,
                high: dominant.high,
                low: dominant.low,
                value: dominant.value,
                source_box_index: last.source_box_index,
                frame_index: *frame_index,
            };
            level.push(point.clone());
            last = point;
        }
    }

    level
}

/// Pick the dominant box of one frame: the smallest-magnitude (innermost)
/// box inside the visible window. Returns None for malformed frames (no
/// boxes, or all boxes dropped by normalization, or the window empty).
fn select_dominant(boxes: &[PatternBox], window: &TimeframeSettings) -> Option<PatternBox> {
    let normalized = normalize(boxes);
    let visible = visible_window(&normalized, window);
    if visible.is_empty() {
        return None;
    }

    let magnitudes: Vec<f64> = visible.iter().map(|b| b.magnitude()).collect();
    // The window is magnitude-sorted descending, so this is normally the
    // last entry; argmin keeps it correct regardless
    let (offset, _) = argmin_value(&magnitudes);

    let mut dominant = visible[offset].clone();
    dominant.box_index = Some(offset);
    Some(dominant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::TimeUtils;

    fn settings(tolerance_ratio: f64) -> LevelSettings {
        LevelSettings {
            tolerance_ratio,
            horizon_ms: TimeUtils::MS_IN_30_MIN,
        }
    }

    fn wide_window() -> TimeframeSettings {
        TimeframeSettings::new(0, 16)
    }

    /// Frame with one outer box and a dominant inner box at [low, high].
    fn frame(ts: i64, high: f64, low: f64) -> BoxSlice {
        let size = high - low;
        BoxSlice::new(
            ts,
            vec![
                PatternBox::new(high + 0.0100, low - 0.0100, size + 0.0200),
                PatternBox::new(high, low, size),
            ],
        )
    }

    #[test]
    fn test_insufficient_history() {
        let s = settings(0.05);
        assert!(track_levels(&[], &wide_window(), &s).is_empty());
        let one = vec![frame(0, 1.2050, 1.2000)];
        assert!(
            track_levels(&one, &wide_window(), &s).is_empty(),
            "a single frame cannot establish a trend"
        );
    }

    #[test]
    fn test_identical_frames_absorbed() {
        // Two frames with identical dominant bounds -> exactly 1 point
        let frames = vec![frame(0, 1.2050, 1.2000), frame(60_000, 1.2050, 1.2000)];
        let level = track_levels(&frames, &wide_window(), &settings(0.05));
        assert_eq!(level.len(), 1, "second frame is noise");
        assert_eq!(level[0].cumulative_width, 0.0);
        assert_eq!(level[0].high, 1.2050);
        assert_eq!(level[0].source_box_index, 1, "dominant is the inner box");
    }

    #[test]
    fn test_boundary_jump_accepted() {
        // high jumps 1.2000 -> 1.2050 with size 0.0010 and tolerance 0.01:
        // 0.0050 >= 0.0010 * 0.01 -> second point accepted
        let frames = vec![frame(0, 1.2000, 1.1990), frame(60_000, 1.2050, 1.2040)];
        let level = track_levels(&frames, &wide_window(), &settings(0.01));
        assert_eq!(level.len(), 2);
        assert!((level[1].cumulative_width - 0.0050).abs() < 1e-12);
        assert_eq!(level[1].frame_index, 1);
        assert_eq!(
            level[1].source_box_index, level[0].source_box_index,
            "rank continuity: accepted point inherits the previous rank"
        );
    }

    #[test]
    fn test_tolerance_gating() {
        // Dominant size is 0.0100, tolerance 0.5 -> threshold 0.0050.
        // Frame 1 drifts by exactly the threshold (new point), frame 2
        // drifts by half of it from the accepted level (absorbed).
        let frames = vec![
            frame(0, 1.2100, 1.2000),
            frame(60_000, 1.2150, 1.2050),  // moved 0.0050 == threshold
            frame(120_000, 1.2175, 1.2075), // moved 0.0025 < threshold
        ];
        let level = track_levels(&frames, &wide_window(), &settings(0.5));
        assert_eq!(level.len(), 2, "exact-threshold move accepted, half move absorbed");
        assert_eq!(level[1].high, 1.2150);
    }

    #[test]
    fn test_width_strictly_monotonic() {
        let frames: Vec<BoxSlice> = (0..20)
            .map(|i| {
                let drift = (i as f64) * 0.0030;
                frame(i * 60_000, 1.2050 + drift, 1.2000 + drift)
            })
            .collect();
        let level = track_levels(&frames, &wide_window(), &settings(0.05));
        assert!(level.len() > 2);
        for pair in level.windows(2) {
            assert!(
                pair[1].cumulative_width > pair[0].cumulative_width,
                "cumulative width never rewinds"
            );
        }
    }

    #[test]
    fn test_stale_frames_discarded() {
        // First frame sits outside the horizon relative to the newest one
        let horizon = TimeUtils::MS_IN_30_MIN;
        let frames = vec![
            frame(0, 1.3000, 1.2900), // stale
            frame(horizon + 60_000, 1.2050, 1.2000),
            frame(horizon + 120_000, 1.2050, 1.2000),
        ];
        let level = track_levels(&frames, &wide_window(), &settings(0.05));
        assert_eq!(level.len(), 1);
        assert_eq!(level[0].high, 1.2050, "stale frame must not seed the level");
        assert_eq!(level[0].frame_index, 1);
    }

    #[test]
    fn test_malformed_frames_skipped() {
        let junk = BoxSlice::new(60_000, vec![PatternBox::new(f64::NAN, f64::NAN, f64::NAN)]);
        let empty = BoxSlice::new(90_000, Vec::new());
        let frames = vec![
            frame(0, 1.2050, 1.2000),
            junk.clone(),
            empty,
            frame(120_000, 1.2150, 1.2100),
        ];
        let level = track_levels(&frames, &wide_window(), &settings(0.05));
        assert_eq!(level.len(), 2, "malformed frames skipped, scan continues");
        assert_eq!(level[1].frame_index, 3);

        let all_junk = vec![junk.clone(), junk];
        assert!(
            track_levels(&all_junk, &wide_window(), &settings(0.05)).is_empty(),
            "all-malformed input yields empty, not an error"
        );
    }

    #[test]
    fn test_dominant_respects_window() {
        // Window limited to the first box only: the outer box becomes the
        // dominant one, keeping layout and tracking index-aligned
        let frames = vec![frame(0, 1.2050, 1.2000), frame(60_000, 1.2150, 1.2100)];
        let narrow = TimeframeSettings::new(0, 1);
        let level = track_levels(&frames, &narrow, &settings(0.01));
        assert_eq!(level.len(), 2);
        assert_eq!(level[0].source_box_index, 0);
        assert!((level[0].high - 1.2150).abs() < 1e-12, "outer box bounds used");
    }

    #[test]
    fn test_zero_size_dominant_does_not_stall_width() {
        // Degenerate dominant (high == low) collapses the threshold to zero;
        // identical bounds must still be absorbed so width stays strict
        let flat = |ts: i64| BoxSlice::new(ts, vec![PatternBox::new(1.2, 1.2, 0.0)]);
        let frames = vec![flat(0), flat(60_000), flat(120_000)];
        let level = track_levels(&frames, &wide_window(), &settings(0.05));
        assert_eq!(level.len(), 1, "zero-move frames contribute no points");
    }
}
