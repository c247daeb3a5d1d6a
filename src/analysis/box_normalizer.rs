use crate::domain::PatternBox;

/// Canonicalize a raw set of boxes for one timestamp.
///
/// - Non-finite boxes (NaN/Infinity anywhere) are dropped, not propagated:
///   a malformed upstream sample must not corrupt the whole visualization.
/// - The survivors are stable-sorted by magnitude descending, so
///   equal-magnitude boxes keep their input order and re-renders stay
///   deterministic.
/// - Each survivor gets its rank stamped into `box_index` so consumers can
///   correlate boxes of the same rank across consecutive timestamps.
///
/// Pure function; the input is never mutated.
pub fn normalize(boxes: &[PatternBox]) -> Vec<PatternBox> {
    let mut kept: Vec<PatternBox> = boxes.iter().filter(|b| b.is_finite()).cloned().collect();

    // total_cmp is fine here: NaN was filtered out above
    kept.sort_by(|a, b| b.magnitude().total_cmp(&a.magnitude()));

    for (rank, b) in kept.iter_mut().enumerate() {
        b.box_index = Some(rank);
    }

    kept
}
