use contracts::dashboards::d410_report_pipeline::FrequencyBucket;

use crate::shared::aggregation::histogram::{bucketize, frequency_rank, FREQUENCY_RANGES};
use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver as fr;

pub const LABEL_KEYS: &[&str] = &["rangeLabel", "KhoangMua", "khoangMua", "range", "label"];
pub const CUSTOMER_KEYS: &[&str] = &["customers", "SoKhachHang", "soKhachHang", "count"];
/// Per-customer shape: one row per customer with its purchase count
pub const PURCHASE_COUNT_KEYS: &[&str] = &["purchaseCount", "SoLanMua", "soLanMua", "purchases"];

/// Accepts either pre-bucketed rows (`{KhoangMua: "3-5", SoKhachHang: 7}`) or
/// one row per customer, which is bucketed with the fixed frequency table.
/// Output is ordered by [`frequency_rank`].
pub fn normalize(payload: &RawPayload) -> Vec<FrequencyBucket> {
    let rows = payload.rows();
    let pre_bucketed = rows.iter().any(|row| fr::has_any(row, LABEL_KEYS));

    let mut buckets: Vec<FrequencyBucket> = if pre_bucketed {
        rows.into_iter()
            .filter_map(|row| {
                Some(FrequencyBucket {
                    range_label: fr::text_or_none(row, LABEL_KEYS)?,
                    customers: fr::count(row, CUSTOMER_KEYS),
                })
            })
            .collect()
    } else {
        let counts: Vec<f64> = rows
            .into_iter()
            .filter_map(|row| fr::resolve_strict::<f64>(row, PURCHASE_COUNT_KEYS))
            .collect();
        if counts.is_empty() {
            return Vec::new();
        }
        bucketize(&counts, FREQUENCY_RANGES)
            .into_iter()
            .map(|b| FrequencyBucket {
                range_label: b.range_label,
                customers: b.count,
            })
            .collect()
    };

    // Unranked labels share rank 0; the label keeps their order stable
    buckets.sort_by(|a, b| {
        frequency_rank(&a.range_label)
            .cmp(&frequency_rank(&b.range_label))
            .then_with(|| a.range_label.cmp(&b.range_label))
    });
    buckets
}
