/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds `value` to `decimals` places, sending exact halves to the even neighbour.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Number of whole units needed to cover `value`; zero for anything not positive.
pub fn ceil_count(value: f64) -> u64 {
    if value > 0.0 { value.ceil() as u64 } else { 0 }
}
