use contracts::dashboards::d410_report_pipeline::CohortObservation;

use super::map_rows;
use crate::shared::aggregation::cohort_matrix::MAX_MONTHS_SINCE;
use crate::shared::aggregation::histogram::{month_key, months_since};
use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver::{self as fr, RawRow};

pub const COHORT_KEYS: &[&str] = &[
    "cohortKey",
    "cohort",
    "ThangDangKy",
    "thangDangKy",
    "KyDau",
    "cohort_month",
];
pub const MONTHS_SINCE_KEYS: &[&str] = &[
    "monthsSince",
    "months_since",
    "SoThang",
    "soThang",
    "monthIndex",
];
/// Used only when the offset itself is missing
pub const ACTIVITY_MONTH_KEYS: &[&str] = &["activityMonth", "ThangMua", "thangMua", "activity_month"];
pub const COHORT_SIZE_KEYS: &[&str] = &[
    "cohortSize",
    "cohort_size",
    "SoKhachBanDau",
    "soKhachBanDau",
    "size",
];
pub const RETAINED_KEYS: &[&str] = &[
    "retained",
    "SoKhachQuayLai",
    "soKhachQuayLai",
    "retainedCustomers",
    "retained_customers",
];
pub const RATE_KEYS: &[&str] = &[
    "rate",
    "TyLeGiuChan",
    "tyLeGiuChan",
    "retentionRate",
    "retention_rate",
];

fn observation(row: &RawRow) -> Option<CohortObservation> {
    let raw_key = fr::text_or_none(row, COHORT_KEYS)?;
    let cohort_key = month_key(&raw_key);

    // Negative or far-out offsets cannot be placed; they are dropped, never clamped
    let months = match fr::resolve_strict::<i64>(row, MONTHS_SINCE_KEYS) {
        Some(m) => u32::try_from(m).ok()?,
        None => {
            let activity = fr::text_or_none(row, ACTIVITY_MONTH_KEYS)?;
            months_since(&cohort_key, &activity)?
        }
    };
    if months > MAX_MONTHS_SINCE {
        return None;
    }

    let cohort_size = fr::count(row, COHORT_SIZE_KEYS);
    let retained = fr::count(row, RETAINED_KEYS);
    let rate = match fr::resolve_strict::<f64>(row, RATE_KEYS) {
        Some(r) => r,
        None if cohort_size > 0 => retained as f64 / cohort_size as f64 * 100.0,
        None => 0.0,
    };

    Some(CohortObservation {
        cohort_key,
        months_since: months,
        cohort_size,
        retained,
        rate,
    })
}

/// Rows that cannot be placed in the matrix (no cohort, no offset, an offset
/// below 0 or above `MAX_MONTHS_SINCE`) are dropped
pub fn normalize(payload: &RawPayload) -> Vec<CohortObservation> {
    map_rows(payload, observation)
}
