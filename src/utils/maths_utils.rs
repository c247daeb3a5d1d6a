use argminmax::ArgMinMax;

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

#[allow(dead_code)]
pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// Index and value of the smallest element.
/// Callers must guarantee the slice is non-empty.
pub fn argmin_value(vec: &[f64]) -> (usize, f64) {
    let min_index: usize = vec.argmin();
    (min_index, vec[min_index])
}

/// Linearly rescale `values` so the largest lands on `target_max`.
/// An all-zero or empty input comes back unchanged to avoid dividing by zero.
pub fn rescale_to_max(values: &[f64], target_max: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let max_value = get_max(values);
    if max_value <= 0.0 {
        return values.to_vec();
    }
    values
        .iter()
        .map(|&v| (v / max_value) * target_max)
        .collect()
}
