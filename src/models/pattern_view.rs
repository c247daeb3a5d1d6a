use anyhow::{Result, bail};
use itertools::Itertools;

use crate::analysis::box_normalizer::normalize;
use crate::analysis::level_tracker::track_levels;
use crate::analysis::nested_layout::{PositionedBox, layout_boxes};
use crate::config::AnalysisConfig;
use crate::domain::visible_window;
use crate::models::box_slice::BoxSlice;
use crate::models::level::{LevelPoint, LevelTrend, segment_trend};
use crate::utils::maths_utils::rescale_to_max;

/// The derived view of one pair: the nested layout of the newest slice plus
/// the tracked level polyline over the recent history.
///
/// Recomputed wholesale whenever a newer slice or window arrives and handed
/// to the rendering layer behind an `Arc`; the previous model is simply
/// dropped (last write wins).
#[derive(Debug, Clone)]
pub struct PatternModel {
    pub pair_name: String,
    /// Timestamp of the slice the layout was computed from.
    pub timestamp_ms: i64,
    pub layout: Vec<PositionedBox>,
    pub level: Vec<LevelPoint>,
}

impl PatternModel {
    /// Build the model from a pair's buffered frames.
    ///
    /// The same `visible_window` parameters feed both the layout and the
    /// level tracker so the two visualizations stay index-aligned.
    pub fn from_frames(
        pair_name: String,
        frames: &[BoxSlice],
        config: &AnalysisConfig,
    ) -> Result<Self> {
        let Some(newest) = frames.last() else {
            bail!("No frames available for pair {}", pair_name);
        };

        let normalized = normalize(&newest.boxes);
        let visible = visible_window(&normalized, &config.timeframe);
        let layout = layout_boxes(visible, config.layout.base_pixel_size);

        let level = track_levels(frames, &config.timeframe, &config.level);

        Ok(Self {
            pair_name,
            timestamp_ms: newest.timestamp_ms,
            layout,
            level,
        })
    }

    /// The innermost (most granular) positioned box, if any.
    pub fn dominant_box(&self) -> Option<&PositionedBox> {
        self.layout.last()
    }

    /// Trend of each level segment, for two-colour polyline rendering.
    pub fn level_trends(&self) -> Vec<LevelTrend> {
        self.level
            .iter()
            .tuple_windows()
            .map(|(a, b)| segment_trend(a, b))
            .collect()
    }

    /// Rescale the abstract cumulative widths onto a concrete drawing width.
    /// The tracker works in boundary-distance units; pixels are the
    /// renderer's problem.
    pub fn level_widths_for(&self, draw_width: f64) -> Vec<f64> {
        let widths: Vec<f64> = self.level.iter().map(|p| p.cumulative_width).collect();
        rescale_to_max(&widths, draw_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ANALYSIS;
    use crate::domain::PatternBox;

    fn frame(ts: i64, drift: f64) -> BoxSlice {
        BoxSlice::new(
            ts,
            vec![
                PatternBox::new(1.2200 + drift, 1.2000 + drift, 0.0200),
                PatternBox::new(1.2100 + drift, 1.2050 + drift, -0.0050),
            ],
        )
    }

    #[test]
    fn test_model_from_frames() {
        let frames = vec![frame(0, 0.0), frame(60_000, 0.0040), frame(120_000, 0.0080)];
        let model = PatternModel::from_frames("EURUSD".to_string(), &frames, &ANALYSIS).unwrap();

        assert_eq!(model.timestamp_ms, 120_000);
        assert_eq!(model.layout.len(), 2);
        assert_eq!(model.dominant_box().unwrap().depth, 1);
        assert!(model.level.len() >= 2, "drifting frames must produce a polyline");

        let trends = model.level_trends();
        assert_eq!(trends.len(), model.level.len() - 1);
        assert!(trends.iter().all(|t| *t == LevelTrend::Rising));
    }

    #[test]
    fn test_model_rejects_empty_history() {
        assert!(PatternModel::from_frames("EURUSD".to_string(), &[], &ANALYSIS).is_err());
    }

    #[test]
    fn test_level_width_rescaling() {
        let frames = vec![frame(0, 0.0), frame(60_000, 0.0040), frame(120_000, 0.0080)];
        let model = PatternModel::from_frames("EURUSD".to_string(), &frames, &ANALYSIS).unwrap();

        let widths = model.level_widths_for(600.0);
        assert_eq!(widths.len(), model.level.len());
        assert_eq!(widths[0], 0.0);
        assert_eq!(*widths.last().unwrap(), 600.0, "last point lands on the draw width");
    }
}
