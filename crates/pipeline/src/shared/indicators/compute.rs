use contracts::dashboards::d410_report_pipeline::{InventoryStatus, KpiSet, ReportRecords};
use contracts::shared::indicators::*;

use super::metadata::ids;
use crate::shared::aggregation::{safe_average, safe_sum};
use crate::shared::format::{format_number, format_percent};
use crate::shared::normalizers::marketing::roi_percent;

/// Inputs every compute function sees
pub struct IndicatorContext<'a> {
    pub kpis: &'a KpiSet,
    pub records: &'a ReportRecords,
}

fn card(id: IndicatorId, value: Option<f64>, status: IndicatorStatus) -> IndicatorValue {
    IndicatorValue {
        id,
        value,
        status,
        subtitle: None,
    }
}

fn placeholder(id: IndicatorId, subtitle: &str) -> IndicatorValue {
    IndicatorValue {
        id,
        value: None,
        status: IndicatorStatus::Neutral,
        subtitle: Some(subtitle.to_string()),
    }
}

pub fn compute_total_revenue(ctx: &IndicatorContext) -> IndicatorValue {
    let revenue = ctx.kpis.total_revenue;
    let status = if revenue > 0.0 {
        IndicatorStatus::Good
    } else {
        IndicatorStatus::Neutral
    };
    let mut value = card(ids::total_revenue(), Some(revenue), status);
    if ctx.records.procedure_totals.is_some_and(|t| t.total_revenue.is_some()) {
        value.subtitle = Some("Theo tổng hợp của báo cáo".into());
    }
    value
}

pub fn compute_total_orders(ctx: &IndicatorContext) -> IndicatorValue {
    card(
        ids::total_orders(),
        Some(ctx.kpis.total_orders as f64),
        IndicatorStatus::Neutral,
    )
}

pub fn compute_average_order_value(ctx: &IndicatorContext) -> IndicatorValue {
    match ctx.kpis.average_order_value {
        Some(aov) => card(ids::average_order_value(), Some(aov), IndicatorStatus::Neutral),
        None => placeholder(ids::average_order_value(), "Chưa có đơn hàng"),
    }
}

pub fn compute_total_customers(ctx: &IndicatorContext) -> IndicatorValue {
    match ctx.kpis.total_customers {
        Some(customers) => card(
            ids::total_customers(),
            Some(customers as f64),
            IndicatorStatus::Neutral,
        ),
        None => placeholder(ids::total_customers(), "Không có dữ liệu khách hàng"),
    }
}

pub fn compute_stock_alerts(ctx: &IndicatorContext) -> IndicatorValue {
    let inventory = &ctx.records.inventory;
    let alerts = inventory
        .iter()
        .filter(|a| a.status != InventoryStatus::Normal)
        .count() as u64;
    let out = inventory
        .iter()
        .filter(|a| a.status == InventoryStatus::Out)
        .count() as u64;

    let status = match (alerts, out) {
        (0, _) => IndicatorStatus::Good,
        (_, 0) => IndicatorStatus::Warning,
        _ => IndicatorStatus::Bad,
    };
    let mut value = card(ids::stock_alerts(), Some(alerts as f64), status);
    if out > 0 {
        value.subtitle = Some(format!("{} sản phẩm hết hàng", format_number(out)));
    }
    value
}

/// ROI over all campaigns together. The mean of per-campaign ROIs goes in
/// the subtitle.
pub fn compute_campaign_roi(ctx: &IndicatorContext) -> IndicatorValue {
    let campaigns = &ctx.records.campaigns;
    let spend = safe_sum(campaigns, |c| c.spend);
    let revenue = safe_sum(campaigns, |c| c.revenue);

    match roi_percent(spend, revenue) {
        Some(roi) => {
            let status = if roi >= 0.0 {
                IndicatorStatus::Good
            } else {
                IndicatorStatus::Bad
            };
            let per_campaign: Vec<f64> = campaigns
                .iter()
                .filter_map(|c| c.roi.or_else(|| roi_percent(c.spend, c.revenue)))
                .collect();
            let mut value = card(ids::campaign_roi(), Some(roi), status);
            value.subtitle = safe_average(&per_campaign, |r| *r)
                .map(|avg| format!("Trung bình mỗi chiến dịch: {}", format_percent(avg, 1)));
            value
        }
        None => placeholder(ids::campaign_roi(), "Chưa có chi phí chiến dịch"),
    }
}

pub fn compute_gross_profit(ctx: &IndicatorContext) -> IndicatorValue {
    let Some(summary) = ctx.records.financial.as_ref() else {
        return placeholder(ids::gross_profit(), "Không có dữ liệu tài chính");
    };
    // Derive from net revenue and cost when the report does not carry it
    let profit = summary.gross_profit.or_else(|| {
        let net = summary.net_revenue?;
        Some(net - summary.cost_of_goods?)
    });
    match profit {
        Some(p) if p.is_finite() => {
            let status = if p >= 0.0 {
                IndicatorStatus::Good
            } else {
                IndicatorStatus::Bad
            };
            card(ids::gross_profit(), Some(p), status)
        }
        _ => placeholder(ids::gross_profit(), "Không đủ dữ liệu"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d410_report_pipeline::{
        CampaignPerformance, FinancialSummary, InventoryAlert,
    };

    fn ctx<'a>(kpis: &'a KpiSet, records: &'a ReportRecords) -> IndicatorContext<'a> {
        IndicatorContext { kpis, records }
    }

    #[test]
    fn test_missing_average_is_a_placeholder() {
        let kpis = KpiSet {
            total_revenue: 100.0,
            total_orders: 0,
            average_order_value: None,
            total_customers: None,
        };
        let records = ReportRecords::default();
        let card = compute_average_order_value(&ctx(&kpis, &records));
        assert_eq!(card.value, None);
        assert!(card.subtitle.is_some());
    }

    #[test]
    fn test_stock_alert_status() {
        let alert = |status| InventoryAlert {
            product: "p".into(),
            sku: "s".into(),
            current_stock: 0,
            min_stock: 5,
            status,
        };
        let kpis = KpiSet::default();
        let mut records = ReportRecords {
            inventory: vec![alert(InventoryStatus::Normal), alert(InventoryStatus::Low)],
            ..ReportRecords::default()
        };
        let warn = compute_stock_alerts(&ctx(&kpis, &records));
        assert_eq!(warn.value, Some(1.0));
        assert_eq!(warn.status, IndicatorStatus::Warning);

        records.inventory.push(alert(InventoryStatus::Out));
        let bad = compute_stock_alerts(&ctx(&kpis, &records));
        assert_eq!(bad.value, Some(2.0));
        assert_eq!(bad.status, IndicatorStatus::Bad);
    }

    #[test]
    fn test_campaign_roi_is_pooled() {
        let campaign = |spend, revenue| CampaignPerformance {
            name: "c".into(),
            channel: "facebook".into(),
            spend,
            revenue,
            conversions: 0,
            roi: None,
        };
        let kpis = KpiSet::default();
        let records = ReportRecords {
            campaigns: vec![campaign(100.0, 300.0), campaign(100.0, 0.0)],
            ..ReportRecords::default()
        };
        let roi = compute_campaign_roi(&ctx(&kpis, &records));
        assert_eq!(roi.value, Some(50.0));
        assert_eq!(roi.status, IndicatorStatus::Good);
    }

    #[test]
    fn test_campaign_roi_subtitle_averages_campaigns() {
        let campaign = |spend, revenue, roi| CampaignPerformance {
            name: "c".into(),
            channel: "zalo".into(),
            spend,
            revenue,
            conversions: 0,
            roi,
        };
        let kpis = KpiSet::default();
        let records = ReportRecords {
            campaigns: vec![
                campaign(100.0, 300.0, None),
                campaign(300.0, 300.0, Some(0.0)),
                campaign(0.0, 50.0, None),
            ],
            ..ReportRecords::default()
        };
        let roi = compute_campaign_roi(&ctx(&kpis, &records));
        // pooled: (650 - 400) / 400
        assert_eq!(roi.value, Some(62.5));
        // per campaign: 200 and 0; the zero-spend campaign has no ROI
        assert_eq!(roi.subtitle.as_deref(), Some("Trung bình mỗi chiến dịch: 100,0%"));
    }

    #[test]
    fn test_gross_profit_derived() {
        let kpis = KpiSet::default();
        let records = ReportRecords {
            financial: Some(FinancialSummary {
                net_revenue: Some(900.0),
                cost_of_goods: Some(1000.0),
                ..FinancialSummary::default()
            }),
            ..ReportRecords::default()
        };
        let card = compute_gross_profit(&ctx(&kpis, &records));
        assert_eq!(card.value, Some(-100.0));
        assert_eq!(card.status, IndicatorStatus::Bad);
    }
}
