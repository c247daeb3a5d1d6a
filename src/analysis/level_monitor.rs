use std::collections::HashMap;

use crate::models::level::LevelTrend;
use crate::models::pattern_view::PatternModel;

/// Signal raised when a pair's level line changes direction.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelSignal {
    /// The newest level segment reversed against the previous observation.
    TrendFlip { pair_name: String, to: LevelTrend },
}

/// Multi-pair monitoring over freshly computed models.
/// Remembers the latest observed trend per pair and raises a signal when the
/// newest segment flips direction.
pub struct LevelMonitor {
    last_trend: HashMap<String, LevelTrend>,
    signals: Vec<LevelSignal>,
}

impl LevelMonitor {
    pub fn new() -> Self {
        Self {
            last_trend: HashMap::new(),
            signals: Vec::new(),
        }
    }

    /// Observe a recomputed model. Returns the raised signal, if any, and
    /// records it for later retrieval by the UI layer.
    pub fn observe(&mut self, model: &PatternModel) -> Option<LevelSignal> {
        let current = *model.level_trends().last()?;

        let previous = self.last_trend.insert(model.pair_name.clone(), current);
        match previous {
            Some(prev) if prev != current => {
                let signal = LevelSignal::TrendFlip {
                    pair_name: model.pair_name.clone(),
                    to: current,
                };
                // Replace any earlier signal for the same pair
                self.signals.retain(|s| {
                    let LevelSignal::TrendFlip { pair_name, .. } = s;
                    pair_name != &model.pair_name
                });
                self.signals.push(signal.clone());
                Some(signal)
            }
            _ => None,
        }
    }

    /// All currently raised signals.
    pub fn get_signals(&self) -> &[LevelSignal] {
        &self.signals
    }

    pub fn pair_count(&self) -> usize {
        self.last_trend.len()
    }

    pub fn clear_signals(&mut self) {
        self.signals.clear();
    }
}

impl Default for LevelMonitor {
    fn default() -> Self {
        Self::new()
    }
}
