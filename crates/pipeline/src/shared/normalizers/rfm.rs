use contracts::dashboards::d410_report_pipeline::RfmSegment;

use super::map_rows;
use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver as fr;

pub const SEGMENT_KEYS: &[&str] = &["segment", "PhanKhuc", "phanKhuc", "TenNhom", "rfmSegment"];
pub const CUSTOMER_KEYS: &[&str] = &[
    "customers",
    "SoKhachHang",
    "soKhachHang",
    "customerCount",
    "count",
];
pub const RECENCY_KEYS: &[&str] = &[
    "avgRecencyDays",
    "NgayGanNhatTB",
    "ngayGanNhatTB",
    "recency",
    "avg_recency",
];
pub const FREQUENCY_KEYS: &[&str] = &[
    "avgFrequency",
    "TanSuatTB",
    "tanSuatTB",
    "frequency",
    "avg_frequency",
];
pub const MONETARY_KEYS: &[&str] = &[
    "avgMonetary",
    "GiaTriTB",
    "giaTriTB",
    "monetary",
    "avg_monetary",
];

pub fn normalize(payload: &RawPayload) -> Vec<RfmSegment> {
    map_rows(payload, |row| {
        Some(RfmSegment {
            segment: fr::text_or_none(row, SEGMENT_KEYS)?,
            customers: fr::count(row, CUSTOMER_KEYS),
            avg_recency_days: fr::number(row, RECENCY_KEYS),
            avg_frequency: fr::number(row, FREQUENCY_KEYS),
            avg_monetary: fr::number(row, MONETARY_KEYS),
        })
    })
}
