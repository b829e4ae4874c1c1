use contracts::dashboards::d410_report_pipeline::CampaignPerformance;

use super::{map_rows, REVENUE_KEYS};
use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver as fr;

pub const NAME_KEYS: &[&str] = &[
    "name",
    "TenChienDich",
    "tenChienDich",
    "campaignName",
    "campaign",
];
pub const CHANNEL_KEYS: &[&str] = &["channel", "Kenh", "kenh", "source"];
pub const SPEND_KEYS: &[&str] = &["spend", "ChiPhi", "chiPhi", "cost"];
pub const CONVERSION_KEYS: &[&str] = &[
    "conversions",
    "SoChuyenDoi",
    "soChuyenDoi",
    "SoDonHang",
    "orders",
];

/// Return on spend in percent; `None` when nothing was spent
pub fn roi_percent(spend: f64, revenue: f64) -> Option<f64> {
    (spend > 0.0).then(|| (revenue - spend) / spend * 100.0)
}

pub fn normalize(payload: &RawPayload) -> Vec<CampaignPerformance> {
    map_rows(payload, |row| {
        let spend = fr::number(row, SPEND_KEYS);
        let revenue = fr::number(row, REVENUE_KEYS);
        Some(CampaignPerformance {
            name: fr::text(row, NAME_KEYS),
            channel: fr::text(row, CHANNEL_KEYS),
            spend,
            revenue,
            conversions: fr::count(row, CONVERSION_KEYS),
            roi: roi_percent(spend, revenue),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalizers::test_support::{as_payload, payload};
    use serde_json::json;

    #[test]
    fn test_campaigns_and_roi() {
        let campaigns = normalize(&payload(json!([
            {"TenChienDich": "Tet 2024", "Kenh": "Facebook", "ChiPhi": 200, "DoanhThu": 500, "SoChuyenDoi": 9},
            {"name": "Organic", "channel": "SEO", "spend": 0, "revenue": 120}
        ])));
        assert_eq!(campaigns[0].roi, Some(150.0));
        assert_eq!(campaigns[0].conversions, 9);
        assert_eq!(campaigns[1].roi, None);
        assert_eq!(normalize(&as_payload(&campaigns)), campaigns);
    }
}
