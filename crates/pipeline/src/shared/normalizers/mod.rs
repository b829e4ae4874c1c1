//! Row normalizers: one per report domain.
//!
//! Every normalizer is total. Empty, null or oddly shaped payloads produce
//! empty output; a malformed field degrades to its default. Alias tables list
//! the canonical (serialized) field name first, so feeding normalized records
//! back through a normalizer reproduces them unchanged.

pub mod cohort;
pub mod customers;
pub mod financial;
pub mod frequency;
pub mod inventory;
pub mod marketing;
pub mod order_values;
pub mod products;
pub mod rfm;
pub mod sales;
pub mod voucher;

use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver::RawRow;

/// Map every row of a payload, dropping rows the mapper rejects.
pub(crate) fn map_rows<T>(payload: &RawPayload, f: impl Fn(&RawRow) -> Option<T>) -> Vec<T> {
    payload.rows().into_iter().filter_map(f).collect()
}

/// Shared revenue aliases; most endpoints agree on these
pub(crate) const REVENUE_KEYS: &[&str] = &[
    "revenue",
    "DoanhThu",
    "doanhThu",
    "doanh_thu",
    "TongTien",
    "revenueTotal",
];

#[cfg(test)]
pub(crate) mod test_support {
    use serde::Serialize;
    use serde_json::Value;

    use crate::shared::data_source::RawPayload;

    /// Serialize canonical records back into a row payload
    pub fn as_payload<T: Serialize>(records: &[T]) -> RawPayload {
        RawPayload::from_response(serde_json::to_value(records).unwrap_or(Value::Null))
    }

    pub fn payload(v: Value) -> RawPayload {
        RawPayload::from_response(v)
    }
}
