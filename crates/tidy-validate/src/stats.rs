//! Order statistics over the present values of a numeric column.

/// Present values in ascending order; missing entries are dropped.
pub fn sorted_present(values: &[Option<f64>]) -> Vec<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(f64::total_cmp);
    present
}

/// Quantile `q` (0.0 to 1.0) of an ascending slice.
///
/// Interpolates linearly between the two closest ranks around position
/// `q * (n - 1)`. Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use tidy_validate::stats::quantile;
///
/// let sorted = [30.0, 100.0, 110.0, 120.0, 130.0, 140.0];
/// assert_eq!(quantile(&sorted, 0.25), Some(102.5));
/// assert_eq!(quantile(&sorted, 0.5), Some(115.0));
/// assert_eq!(quantile(&[], 0.5), None);
/// ```
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q.clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

pub fn median(sorted: &[f64]) -> Option<f64> {
    quantile(sorted, 0.5)
}
