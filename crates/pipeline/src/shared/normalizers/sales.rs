use contracts::dashboards::d410_report_pipeline::{ProcedureTotals, SalesPoint};

use super::REVENUE_KEYS;
use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver::{self as fr, RawRow};

pub const DATE_KEYS: &[&str] = &[
    "date", "Ngay", "ngay", "NgayBan", "ngay_ban", "period", "KyBaoCao", "label",
];
pub const ORDER_KEYS: &[&str] = &[
    "orders",
    "SoDonHang",
    "soDonHang",
    "so_don_hang",
    "orderCount",
    "order_count",
    "SoLuongDon",
];
pub const MAX_REVENUE_KEYS: &[&str] = &[
    "maxRevenue",
    "DoanhThuCaoNhat",
    "doanhThuCaoNhat",
    "max_revenue",
];
pub const MIN_REVENUE_KEYS: &[&str] = &[
    "minRevenue",
    "DoanhThuThapNhat",
    "doanhThuThapNhat",
    "min_revenue",
];
pub const TOTAL_REVENUE_KEYS: &[&str] = &[
    "totalRevenue",
    "TongDoanhThu",
    "tongDoanhThu",
    "tong_doanh_thu",
];
pub const TOTAL_ORDER_KEYS: &[&str] = &[
    "totalOrders",
    "TongDonHang",
    "tongDonHang",
    "tong_don_hang",
    "TongSoDon",
];

/// Labels of the synthetic two-point series built from a high/low row
pub const HIGH_LABEL: &str = "Cao";
pub const LOW_LABEL: &str = "Thap";

/// Sales endpoints answer either with a series or with a single row of
/// high/low revenue plus procedure totals.
#[derive(Debug, Clone, PartialEq)]
pub enum SalesShape<'a> {
    Series(Vec<&'a RawRow>),
    HighLow(&'a RawRow),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesReport {
    pub series: Vec<SalesPoint>,
    pub totals: Option<ProcedureTotals>,
}

fn is_high_low(row: &RawRow) -> bool {
    fr::has_any(row, MAX_REVENUE_KEYS) || fr::has_any(row, MIN_REVENUE_KEYS)
}

pub fn classify(payload: &RawPayload) -> SalesShape<'_> {
    match payload {
        RawPayload::Aggregated(row) if is_high_low(row) => SalesShape::HighLow(row),
        RawPayload::Series(rows) if rows.len() == 1 && is_high_low(&rows[0]) => {
            SalesShape::HighLow(&rows[0])
        }
        _ => SalesShape::Series(payload.rows()),
    }
}

fn point(row: &RawRow) -> SalesPoint {
    SalesPoint {
        date: fr::text(row, DATE_KEYS),
        revenue: fr::number(row, REVENUE_KEYS),
        orders: fr::count(row, ORDER_KEYS),
    }
}

/// Totals carried by a pre-aggregated row. Absent and invalid stay `None`.
pub fn procedure_totals(row: &RawRow) -> Option<ProcedureTotals> {
    let totals = ProcedureTotals {
        total_revenue: fr::resolve_strict::<f64>(row, TOTAL_REVENUE_KEYS),
        total_orders: fr::resolve_strict::<u64>(row, TOTAL_ORDER_KEYS),
    };
    (!totals.is_empty()).then_some(totals)
}

pub fn normalize(payload: &RawPayload) -> SalesReport {
    match classify(payload) {
        SalesShape::HighLow(row) => SalesReport {
            series: vec![
                SalesPoint {
                    date: HIGH_LABEL.to_string(),
                    revenue: fr::number(row, MAX_REVENUE_KEYS),
                    orders: 0,
                },
                SalesPoint {
                    date: LOW_LABEL.to_string(),
                    revenue: fr::number(row, MIN_REVENUE_KEYS),
                    orders: 0,
                },
            ],
            totals: procedure_totals(row),
        },
        SalesShape::Series(rows) => {
            // A bare aggregated row without high/low keys only carries totals
            let totals = match payload {
                RawPayload::Aggregated(row) => procedure_totals(row),
                _ => None,
            };
            let series = match payload {
                RawPayload::Aggregated(row)
                    if !fr::has_any(row, DATE_KEYS) && !fr::has_any(row, REVENUE_KEYS) =>
                {
                    Vec::new()
                }
                _ => rows.into_iter().map(point).collect(),
            };
            SalesReport { series, totals }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalizers::test_support::{as_payload, payload};
    use serde_json::json;

    #[test]
    fn test_vietnamese_series_row() {
        let report = normalize(&payload(json!([
            {"Ngay": "2024-01-01", "DoanhThu": "1000000", "SoDonHang": "5"}
        ])));
        assert_eq!(
            report.series,
            vec![SalesPoint {
                date: "2024-01-01".to_string(),
                revenue: 1_000_000.0,
                orders: 5
            }]
        );
        assert_eq!(report.totals, None);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let report = normalize(&payload(json!({"rows": [{"Ngay": "2024-02-01"}, {}]})));
        assert_eq!(report.series.len(), 2);
        assert_eq!(report.series[0].revenue, 0.0);
        assert_eq!(report.series[1].orders, 0);
        assert_eq!(report.series[1].date, "");
    }

    #[test]
    fn test_high_low_row_expands_to_two_points() {
        let report = normalize(&payload(json!({
            "success": true,
            "data": {"DoanhThuCaoNhat": 900, "DoanhThuThapNhat": "100", "TongDoanhThu": 5000, "TongDonHang": 12}
        })));
        assert_eq!(report.series.len(), 2);
        assert_eq!(report.series[0].date, HIGH_LABEL);
        assert_eq!(report.series[0].revenue, 900.0);
        assert_eq!(report.series[1].date, LOW_LABEL);
        assert_eq!(report.series[1].revenue, 100.0);
        assert_eq!(
            report.totals,
            Some(ProcedureTotals {
                total_revenue: Some(5000.0),
                total_orders: Some(12)
            })
        );
    }

    #[test]
    fn test_single_row_list_with_high_low_markers() {
        let report = normalize(&payload(json!([{"maxRevenue": 3, "minRevenue": 1}])));
        assert_eq!(report.series.len(), 2);
        assert_eq!(report.totals, None);
    }

    #[test]
    fn test_totals_only_row() {
        let report = normalize(&payload(json!({"TongDoanhThu": "500"})));
        assert!(report.series.is_empty());
        assert_eq!(report.totals.and_then(|t| t.total_revenue), Some(500.0));
    }

    #[test]
    fn test_empty_and_garbage_inputs() {
        assert_eq!(normalize(&RawPayload::Empty), SalesReport::default());
        assert_eq!(normalize(&payload(json!(null))), SalesReport::default());
        assert_eq!(normalize(&payload(json!("x"))), SalesReport::default());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let first = normalize(&payload(json!([
            {"Ngay": "2024-01-01", "DoanhThu": "1000000", "SoDonHang": "5"},
            {"date": "2024-01-02", "doanh_thu": 42.5, "orderCount": 1}
        ])));
        let second = normalize(&as_payload(&first.series));
        assert_eq!(first.series, second.series);

        let high_low = normalize(&payload(json!({"maxRevenue": 10, "minRevenue": 2})));
        assert_eq!(normalize(&as_payload(&high_low.series)).series, high_low.series);
    }
}
