//! Divide-by-zero safe arithmetic.
//!
//! Every mean, capacity normalization and percentage in the crate goes through
//! these helpers. None of them can return `NaN` or an infinity.

/// `numerator / denominator`, or `None` when the quotient is undefined.
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// `numerator / denominator`, falling back to `default` when undefined.
pub fn ratio_or(numerator: f64, denominator: f64, default: f64) -> f64 {
    safe_ratio(numerator, denominator).unwrap_or(default)
}

/// Arithmetic mean; 0 for an empty input.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    ratio_or(sum, count as f64, 0.0)
}

/// `100 * part / whole`; 0 when `whole` is 0.
pub fn percentage(part: f64, whole: f64) -> f64 {
    ratio_or(part * 100.0, whole, 0.0)
}

/// Percentage of two counts rounded to the nearest whole number.
pub fn rounded_percentage(part: usize, whole: usize) -> u32 {
    let value = percentage(part as f64, whole as f64).round();
    if value <= 0.0 {
        0
    } else {
        value as u32
    }
}
