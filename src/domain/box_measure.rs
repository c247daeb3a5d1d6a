use serde::{Deserialize, Serialize};

// Define the BoxDirection enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxDirection {
    Bullish,
    Bearish,
}

/// One nested high/low/value measurement at a single timestamp.
///
/// `value` is a signed magnitude: positive means expansion (bullish),
/// negative means contraction (bearish). Upstream guarantees that
/// `abs(high - low)` matches `abs(value)` to the instrument's display
/// precision, but nothing in the core relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternBox {
    pub high: f64,
    pub low: f64,
    pub value: f64,

    /// Rank within the normalized parent slice (largest magnitude = 0).
    /// Stamped during normalization; correlates boxes of the same rank
    /// across consecutive timestamps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_index: Option<usize>,
}

impl PatternBox {
    // A constructor for convenience
    pub fn new(high: f64, low: f64, value: f64) -> Self {
        PatternBox {
            high,
            low,
            value,
            box_index: None,
        }
    }

    /// A method to determine the direction of the box.
    /// Exactly zero counts as Bullish so the corner rule has no float-sign hole.
    pub fn direction(&self) -> BoxDirection {
        if self.value >= 0.0 {
            BoxDirection::Bullish
        } else {
            BoxDirection::Bearish
        }
    }

    /// Unsigned magnitude, the sort key for normalization.
    pub fn magnitude(&self) -> f64 {
        self.value.abs()
    }

    /// Vertical extent of the box boundaries.
    pub fn size(&self) -> f64 {
        (self.high - self.low).abs()
    }

    /// True when every numeric field is a usable finite number.
    /// NaN or infinity anywhere disqualifies the whole box.
    pub fn is_finite(&self) -> bool {
        self.high.is_finite() && self.low.is_finite() && self.value.is_finite()
    }

    /// Checks the upstream `abs(high - low) == abs(value)` invariant to within
    /// `epsilon`. Violations are tolerated everywhere in the core; the feed
    /// boundary merely logs them.
    pub fn is_consistent(&self, epsilon: f64) -> bool {
        (self.size() - self.magnitude()).abs() <= epsilon
    }
}
