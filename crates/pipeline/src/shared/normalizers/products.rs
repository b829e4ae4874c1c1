use contracts::dashboards::d410_report_pipeline::ProductSales;
use serde_json::Map;

use super::REVENUE_KEYS;
use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver::{self as fr, RawRow};

pub const NAME_KEYS: &[&str] = &[
    "name",
    "TenSanPham",
    "tenSanPham",
    "ten_san_pham",
    "productName",
    "product_name",
    "TenSP",
];
pub const SKU_KEYS: &[&str] = &[
    "sku",
    "MaSanPham",
    "maSanPham",
    "ma_san_pham",
    "productCode",
    "product_code",
    "MaSP",
];
pub const SALES_KEYS: &[&str] = &["sales", "SoLuong", "soLuong", "quantity", "units"];

/// Presence of any of these marks rows already aggregated by a procedure
pub const AGGREGATED_MARKERS: &[&str] = &[
    "TongSoLuong",
    "TongDoanhThu",
    "SoLuongBan",
    "totalQuantity",
    "total_quantity",
    "totalSold",
];
const AGGREGATED_SALES_KEYS: &[&str] = &[
    "sales",
    "TongSoLuong",
    "SoLuongBan",
    "totalQuantity",
    "total_quantity",
    "totalSold",
    "SoLuong",
    "quantity",
];
const AGGREGATED_REVENUE_KEYS: &[&str] = &[
    "revenue",
    "TongDoanhThu",
    "tongDoanhThu",
    "totalRevenue",
    "DoanhThu",
    "doanhThu",
];

/// Serialized names of the canonical fields; never duplicated into extras
const CANONICAL_KEYS: &[&str] = &["name", "sku", "sales", "revenue"];

pub fn is_aggregated(payload: &RawPayload) -> bool {
    payload
        .rows()
        .iter()
        .any(|row| fr::has_any(row, AGGREGATED_MARKERS))
}

fn name_of(row: &RawRow, sku: &Option<String>) -> String {
    fr::text_or_none(row, NAME_KEYS)
        .or_else(|| sku.clone())
        .unwrap_or_default()
}

fn standard(row: &RawRow) -> ProductSales {
    let sku = fr::text_or_none(row, SKU_KEYS);
    ProductSales {
        name: name_of(row, &sku),
        sku,
        sales: fr::count(row, SALES_KEYS),
        revenue: fr::number(row, REVENUE_KEYS),
        extras: Map::new(),
    }
}

fn aggregated(row: &RawRow) -> ProductSales {
    let sku = fr::text_or_none(row, SKU_KEYS);
    let extras = row
        .iter()
        .filter(|(k, _)| !CANONICAL_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    ProductSales {
        name: name_of(row, &sku),
        sku,
        sales: fr::count(row, AGGREGATED_SALES_KEYS),
        revenue: fr::number(row, AGGREGATED_REVENUE_KEYS),
        extras,
    }
}

pub fn normalize(payload: &RawPayload) -> Vec<ProductSales> {
    let rows = payload.rows();
    if is_aggregated(payload) {
        rows.into_iter().map(aggregated).collect()
    } else {
        rows.into_iter().map(standard).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalizers::test_support::{as_payload, payload};
    use serde_json::json;

    #[test]
    fn test_standard_rows() {
        let products = normalize(&payload(json!([
            {"TenSanPham": "Ao thun", "MaSanPham": "AT01", "SoLuong": "3", "DoanhThu": 300000},
            {"productName": "Quan jean", "quantity": 1}
        ])));
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Ao thun");
        assert_eq!(products[0].sku.as_deref(), Some("AT01"));
        assert_eq!(products[0].sales, 3);
        assert_eq!(products[0].revenue, 300000.0);
        assert!(products[0].extras.is_empty());
        assert_eq!(products[1].sku, None);
        assert_eq!(products[1].revenue, 0.0);
    }

    #[test]
    fn test_aggregated_rows_keep_extras() {
        let products = normalize(&payload(json!({"data": {"rows": [
            {"TenSanPham": "Giay", "MaSP": "G1", "TongSoLuong": 7, "TongDoanhThu": "700", "XepHang": 1}
        ]}})));
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.name, "Giay");
        assert_eq!(p.sales, 7);
        assert_eq!(p.revenue, 700.0);
        assert_eq!(p.extras["XepHang"], 1);
        assert_eq!(p.extras["TongSoLuong"], 7);
    }

    #[test]
    fn test_name_falls_back_to_sku() {
        let products = normalize(&payload(json!([{"sku": "X-1", "sales": 2}])));
        assert_eq!(products[0].name, "X-1");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in [
            json!([{"TenSanPham": "Ao", "SoLuong": 2, "DoanhThu": 10}]),
            json!([{"TenSanPham": "Giay", "TongSoLuong": 7, "TongDoanhThu": 700, "XepHang": 1}]),
        ] {
            let first = normalize(&payload(input));
            let second = normalize(&as_payload(&first));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(&RawPayload::Empty).is_empty());
    }
}
