use contracts::dashboards::d410_report_pipeline::CustomerSegment;

use super::{map_rows, REVENUE_KEYS};
use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver as fr;

pub const LEVEL_KEYS: &[&str] = &[
    "level",
    "HangKhachHang",
    "hangKhachHang",
    "CapDo",
    "segment",
    "tier",
    "customerLevel",
];
pub const COUNT_KEYS: &[&str] = &[
    "count",
    "SoKhachHang",
    "soKhachHang",
    "SoLuong",
    "customerCount",
    "customers",
    "total",
];

pub fn normalize(payload: &RawPayload) -> Vec<CustomerSegment> {
    map_rows(payload, |row| {
        Some(CustomerSegment {
            level: fr::text(row, LEVEL_KEYS),
            count: fr::count(row, COUNT_KEYS),
            revenue: fr::number(row, REVENUE_KEYS),
        })
    })
}
