use contracts::dashboards::d410_report_pipeline::{InventoryAlert, InventoryStatus};

use super::map_rows;
use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver::{self as fr, RawRow};

pub const PRODUCT_KEYS: &[&str] = &[
    "product",
    "TenSanPham",
    "tenSanPham",
    "productName",
    "product_name",
    "name",
];
pub const SKU_KEYS: &[&str] = &["sku", "MaSanPham", "maSanPham", "ma_san_pham", "MaSP", "productCode"];
pub const CURRENT_STOCK_KEYS: &[&str] = &[
    "currentStock",
    "TonKho",
    "tonKho",
    "SoLuongTon",
    "current_stock",
    "stock",
];
pub const MIN_STOCK_KEYS: &[&str] = &[
    "minStock",
    "TonToiThieu",
    "tonToiThieu",
    "min_stock",
    "reorderLevel",
];
pub const STATUS_KEYS: &[&str] = &["status", "TrangThai", "trangThai"];

/// Parse a status word. Unknown words map to `Normal`.
pub fn parse_status(raw: &str) -> InventoryStatus {
    let key: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect();
    match key.as_str() {
        "low" | "lowstock" | "saphet" | "sắphết" | "thap" | "thấp" => InventoryStatus::Low,
        "critical" | "khancap" | "khẩncấp" | "nguycap" | "nguycấp" => InventoryStatus::Critical,
        "out" | "outofstock" | "hethang" | "hếthàng" | "soldout" => InventoryStatus::Out,
        _ => InventoryStatus::Normal,
    }
}

/// Status from stock levels when the endpoint sends none
pub fn derive_status(current: i64, min: i64) -> InventoryStatus {
    if current <= 0 {
        InventoryStatus::Out
    } else if min > 0 && current * 2 <= min {
        InventoryStatus::Critical
    } else if current <= min {
        InventoryStatus::Low
    } else {
        InventoryStatus::Normal
    }
}

fn alert(row: &RawRow) -> InventoryAlert {
    let current_stock = fr::integer(row, CURRENT_STOCK_KEYS);
    let min_stock = fr::integer(row, MIN_STOCK_KEYS);
    let status = match fr::lookup(row, STATUS_KEYS) {
        Some(_) => parse_status(&fr::text(row, STATUS_KEYS)),
        None => derive_status(current_stock, min_stock),
    };
    let sku = fr::text(row, SKU_KEYS);
    let product = fr::text_or_none(row, PRODUCT_KEYS).unwrap_or_else(|| sku.clone());

    InventoryAlert {
        product,
        sku,
        current_stock,
        min_stock,
        status,
    }
}

pub fn normalize(payload: &RawPayload) -> Vec<InventoryAlert> {
    map_rows(payload, |row| Some(alert(row)))
}
