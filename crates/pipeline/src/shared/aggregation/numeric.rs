//! Empty- and NaN-safe numeric helpers. None of them panics or returns a
//! non-finite value.

/// Largest accessor value; `0` for an empty slice. Non-finite values are ignored.
pub fn safe_max<T>(items: &[T], accessor: impl Fn(&T) -> f64) -> f64 {
    items
        .iter()
        .map(accessor)
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
        .unwrap_or(0.0)
}

/// Smallest accessor value; `0` for an empty slice. Non-finite values are ignored.
pub fn safe_min<T>(items: &[T], accessor: impl Fn(&T) -> f64) -> f64 {
    items
        .iter()
        .map(accessor)
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
        .unwrap_or(0.0)
}

pub fn safe_sum<T>(items: &[T], accessor: impl Fn(&T) -> f64) -> f64 {
    items
        .iter()
        .map(accessor)
        .filter(|v| v.is_finite())
        .sum()
}

/// Mean of the accessor values; `None` for an empty slice
pub fn safe_average<T>(items: &[T], accessor: impl Fn(&T) -> f64) -> Option<f64> {
    let values: Vec<f64> = items
        .iter()
        .map(accessor)
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// `numerator / denominator`, `None` unless the denominator is positive
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator > 0.0 && numerator.is_finite() {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// Share of each value in the total, in percent. All zeros when the total
/// is not positive; negative values count as zero.
pub fn percentage_shares(values: &[f64]) -> Vec<f64> {
    let clean: Vec<f64> = values
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
        .collect();
    let total: f64 = clean.iter().sum();
    clean
        .iter()
        .map(|v| ratio(*v * 100.0, total).unwrap_or(0.0))
        .collect()
}
