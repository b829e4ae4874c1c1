use contracts::dashboards::d410_report_pipeline::VoucherUsage;

use super::{map_rows, REVENUE_KEYS};
use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver as fr;

pub const CODE_KEYS: &[&str] = &["code", "MaVoucher", "maVoucher", "voucherCode", "voucher"];
pub const USES_KEYS: &[&str] = &[
    "uses",
    "SoLanSuDung",
    "soLanSuDung",
    "usageCount",
    "usage_count",
];
pub const DISCOUNT_KEYS: &[&str] = &[
    "discountTotal",
    "TongGiamGia",
    "tongGiamGia",
    "discount_total",
    "discount",
];

pub fn normalize(payload: &RawPayload) -> Vec<VoucherUsage> {
    map_rows(payload, |row| {
        Some(VoucherUsage {
            code: fr::text_or_none(row, CODE_KEYS)?,
            uses: fr::count(row, USES_KEYS),
            // Backends disagree on the sign of discounts
            discount_total: fr::number(row, DISCOUNT_KEYS).abs(),
            revenue: fr::number(row, REVENUE_KEYS),
        })
    })
}
