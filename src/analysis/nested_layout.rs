use crate::domain::{BoxDirection, PatternBox};

/// Which corner of the parent a nested box is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxCorner {
    TopRight,
    BottomRight,
}

/// One positioned rectangle in the nested layout.
///
/// The list returned by [`layout_boxes`] is flat with an explicit `depth`;
/// conceptually it is a chain where the box at depth d nests inside the one
/// at depth d-1. Ephemeral: recomputed whenever a new slice or window
/// arrives, owned solely by the caller that requested it.
#[derive(Debug, Clone)]
pub struct PositionedBox {
    pub box_measure: PatternBox,
    /// Side length of the bounding square in pixels.
    pub size_px: f64,
    pub corner: BoxCorner,
    pub depth: usize,
    /// True when this box's direction differs from its parent's. Visual
    /// accent only; the geometry rule is unaffected.
    pub emphasis: bool,
}

/// Lay out a normalized (magnitude-descending) box sequence as a chain of
/// nested squares.
///
/// 1. Empty input -> empty output (no placeholder geometry).
/// 2. Zero leading magnitude -> empty output (avoid division by zero).
/// 3. `size_px = (|value_i| / |value_0|) * base_pixel_size`, so the first
///    box always occupies the full base size.
/// 4. Corner placement is purely a function of the box's own direction:
///    Bullish anchors top-right, Bearish bottom-right. A direction flip
///    versus the preceding box only sets `emphasis`.
///
/// Windowing is the caller's job (via `visible_window`); layout stays a pure
/// geometry function of whatever list it is given.
pub fn layout_boxes(normalized: &[PatternBox], base_pixel_size: f64) -> Vec<PositionedBox> {
    let Some(outermost) = normalized.first() else {
        return Vec::new();
    };

    let max_magnitude = outermost.magnitude();
    if max_magnitude == 0.0 {
        return Vec::new();
    }

    let mut placed = Vec::with_capacity(normalized.len());
    let mut prev_direction: Option<BoxDirection> = None;

    for (depth, b) in normalized.iter().enumerate() {
        let direction = b.direction();
        let corner = match direction {
            BoxDirection::Bullish => BoxCorner::TopRight,
            BoxDirection::Bearish => BoxCorner::BottomRight,
        };
        let emphasis = prev_direction.is_some_and(|prev| prev != direction);
        let size_px = (b.magnitude() / max_magnitude) * base_pixel_size;

        placed.push(PositionedBox {
            box_measure: b.clone(),
            size_px,
            corner,
            depth,
            emphasis,
        });

        prev_direction = Some(direction);
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::box_normalizer::normalize;

    #[test]
    fn test_proportional_sizing() {
        // [{high:10, low:0, value:10}, {high:6, low:4, value:2}] at base 100
        // -> outer box 100px, inner box 20px
        let boxes = vec![
            PatternBox::new(10.0, 0.0, 10.0),
            PatternBox::new(6.0, 4.0, 2.0),
        ];
        let normalized = normalize(&boxes);
        assert_eq!(normalized[0].value, 10.0, "already sorted, order unchanged");

        let placed = layout_boxes(&normalized, 100.0);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].size_px, 100.0);
        assert_eq!(placed[1].size_px, 20.0);
        assert_eq!(placed[0].depth, 0);
        assert_eq!(placed[1].depth, 1);
    }

    #[test]
    fn test_containment_invariant() {
        let boxes: Vec<PatternBox> = vec![9.0, 7.5, 7.5, 3.0, 0.5]
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                PatternBox::new(m, 0.0, m * sign)
            })
            .collect();

        let placed = layout_boxes(&normalize(&boxes), 250.0);
        for pair in placed.windows(2) {
            assert!(
                pair[1].size_px <= pair[0].size_px,
                "child must never exceed its parent (equal size is allowed)"
            );
        }
    }

    #[test]
    fn test_corner_follows_direction() {
        let boxes = vec![
            PatternBox::new(10.0, 0.0, 10.0),
            PatternBox::new(5.0, 0.0, -5.0),
            PatternBox::new(2.0, 0.0, 2.0),
        ];
        let placed = layout_boxes(&normalize(&boxes), 100.0);
        assert_eq!(placed[0].corner, BoxCorner::TopRight);
        assert_eq!(placed[1].corner, BoxCorner::BottomRight);
        assert_eq!(placed[2].corner, BoxCorner::TopRight);
    }

    #[test]
    fn test_emphasis_marks_direction_flips() {
        let boxes = vec![
            PatternBox::new(10.0, 0.0, 10.0),
            PatternBox::new(5.0, 0.0, -5.0), // flip
            PatternBox::new(2.0, 0.0, -2.0), // same as previous
        ];
        let placed = layout_boxes(&normalize(&boxes), 100.0);
        assert!(!placed[0].emphasis, "outermost box has no parent to differ from");
        assert!(placed[1].emphasis);
        assert!(!placed[2].emphasis);
    }

    #[test]
    fn test_single_box_full_size() {
        let placed = layout_boxes(&[PatternBox::new(3.0, 1.0, 2.0)], 80.0);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].size_px, 80.0);
        assert_eq!(placed[0].depth, 0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(layout_boxes(&[], 100.0).is_empty());

        // Largest magnitude zero: short-circuit instead of dividing by zero
        let flat = vec![PatternBox::new(5.0, 5.0, 0.0)];
        assert!(layout_boxes(&flat, 100.0).is_empty());
    }
}
