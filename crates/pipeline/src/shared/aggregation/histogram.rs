use chrono::{Datelike, NaiveDate};
use contracts::dashboards::d410_report_pipeline::HistogramBucket;

/// Half-open range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketRange {
    pub label: &'static str,
    pub min: f64,
    /// `None` = unbounded
    pub max: Option<f64>,
}

const MILLION: f64 = 1_000_000.0;

/// Order value table (VND). Partitions `[0, ∞)`.
pub const ORDER_VALUE_RANGES: &[BucketRange] = &[
    BucketRange { label: "0-1tr", min: 0.0, max: Some(MILLION) },
    BucketRange { label: "1-3tr", min: MILLION, max: Some(3.0 * MILLION) },
    BucketRange { label: "3-5tr", min: 3.0 * MILLION, max: Some(5.0 * MILLION) },
    BucketRange { label: "5-10tr", min: 5.0 * MILLION, max: Some(10.0 * MILLION) },
    BucketRange { label: ">10tr", min: 10.0 * MILLION, max: None },
];

/// Purchases per customer. Partitions `[1, ∞)`; customers without a
/// purchase are not part of the distribution.
pub const FREQUENCY_RANGES: &[BucketRange] = &[
    BucketRange { label: "1", min: 1.0, max: Some(2.0) },
    BucketRange { label: "2", min: 2.0, max: Some(3.0) },
    BucketRange { label: "3-5", min: 3.0, max: Some(6.0) },
    BucketRange { label: "6-10", min: 6.0, max: Some(11.0) },
    BucketRange { label: "11+", min: 11.0, max: None },
];

impl BucketRange {
    fn contains(&self, value: f64, is_last: bool) -> bool {
        if value < self.min {
            return false;
        }
        match self.max {
            _ if is_last => true,
            Some(max) => value < max,
            None => true,
        }
    }
}

/// Count values per range. The last range is treated as unbounded; values
/// that match no range (negative, NaN, below the first range) are dropped.
pub fn bucketize(values: &[f64], ranges: &[BucketRange]) -> Vec<HistogramBucket> {
    let mut counts = vec![0u64; ranges.len()];
    let last = ranges.len().saturating_sub(1);

    for &value in values.iter().filter(|v| v.is_finite()) {
        if let Some(i) = ranges
            .iter()
            .enumerate()
            .position(|(i, r)| r.contains(value, i == last))
        {
            counts[i] += 1;
        }
    }

    ranges
        .iter()
        .zip(counts)
        .enumerate()
        .map(|(i, (r, count))| HistogramBucket {
            range_label: r.label.to_string(),
            min: r.min,
            max: if i == last { None } else { r.max },
            count,
        })
        .collect()
}

/// Display order of purchase-frequency labels. Not used for membership.
pub fn frequency_rank(label: &str) -> u32 {
    let label = label.trim();
    match label {
        "1" => 1,
        "2" => 2,
        _ if label.starts_with("3-") => 3,
        _ if label.starts_with("6-") => 6,
        _ if label.ends_with('+') => 11,
        _ => 0,
    }
}

fn parse_month(key: &str) -> Option<NaiveDate> {
    let key = key.trim();
    let date_part = key.get(..10).unwrap_or(key);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{}-01", key.get(..7)?), "%Y-%m-%d").ok())
}

/// `YYYY-MM` for any `YYYY-MM[-DD[...]]` key; other keys are returned trimmed
pub fn month_key(key: &str) -> String {
    match parse_month(key) {
        Some(d) => format!("{:04}-{:02}", d.year(), d.month()),
        None => key.trim().to_string(),
    }
}

/// Whole months from the cohort month to the activity month.
/// `None` when either key is unparsable or activity precedes the cohort.
pub fn months_since(cohort_key: &str, activity_key: &str) -> Option<u32> {
    let start = parse_month(cohort_key)?;
    let end = parse_month(activity_key)?;
    let diff = (end.year() * 12 + end.month() as i32) - (start.year() * 12 + start.month() as i32);
    u32::try_from(diff).ok()
}
