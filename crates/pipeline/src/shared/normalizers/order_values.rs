use super::map_rows;
use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver as fr;

pub const VALUE_KEYS: &[&str] = &[
    "value",
    "orderValue",
    "GiaTriDon",
    "giaTriDon",
    "order_value",
    "TongTien",
];

/// Per-order values feeding the order-value histogram. Rows without a
/// usable value are skipped rather than counted as zero-value orders.
pub fn normalize(payload: &RawPayload) -> Vec<f64> {
    map_rows(payload, |row| fr::resolve_strict::<f64>(row, VALUE_KEYS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalizers::test_support::payload;
    use serde_json::json;

    #[test]
    fn test_values() {
        let values = normalize(&payload(json!([
            {"GiaTriDon": "500000"},
            {"orderValue": 2000000},
            {"GiaTriDon": "n/a"},
            {}
        ])));
        assert_eq!(values, vec![500000.0, 2000000.0]);
    }
}
