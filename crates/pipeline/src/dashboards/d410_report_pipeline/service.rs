use contracts::dashboards::d410_report_pipeline::{ReportRecords, ReportSnapshot};
use contracts::enums::ReportType;

use super::endpoints::EndpointKey;
use super::fetch::FetchBatch;
use crate::shared::aggregation::aggregate;
use crate::shared::charts::build_bundle;
use crate::shared::config::ChartConfig;
use crate::shared::indicators::{indicator_set, IndicatorContext, IndicatorRegistry};
use crate::shared::normalizers::{
    cohort, customers, financial, frequency, inventory, marketing, order_values, products, rfm,
    sales, voucher,
};

/// Route every fetched payload through its normalizer. Endpoints that were
/// not requested or came back empty leave their records empty.
pub fn normalize_batch(batch: &FetchBatch) -> ReportRecords {
    let sales = sales::normalize(batch.payload(EndpointKey::SalesSeries));

    ReportRecords {
        sales_series: sales.series,
        procedure_totals: sales.totals,
        products: products::normalize(batch.payload(EndpointKey::TopProducts)),
        customer_segments: customers::normalize(batch.payload(EndpointKey::CustomerSegments)),
        inventory: inventory::normalize(batch.payload(EndpointKey::Inventory)),
        financial: financial::normalize(batch.payload(EndpointKey::Financial)),
        campaigns: marketing::normalize(batch.payload(EndpointKey::Campaigns)),
        cohorts: cohort::normalize(batch.payload(EndpointKey::Cohort)),
        rfm: rfm::normalize(batch.payload(EndpointKey::Rfm)),
        frequency: frequency::normalize(batch.payload(EndpointKey::Frequency)),
        vouchers: voucher::normalize(batch.payload(EndpointKey::Vouchers)),
        order_values: order_values::normalize(batch.payload(EndpointKey::OrderValues)),
    }
}

/// Records → KPI set → indicator cards → chart geometry
pub fn build_snapshot(
    report_type: ReportType,
    records: ReportRecords,
    registry: &IndicatorRegistry,
    charts: &ChartConfig,
) -> ReportSnapshot {
    let kpis = aggregate(
        &records.sales_series,
        &records.products,
        &records.customer_segments,
        records.procedure_totals.as_ref(),
    );
    let indicators = registry.cards(
        &indicator_set(report_type),
        &IndicatorContext {
            kpis: &kpis,
            records: &records,
        },
    );
    let charts = build_bundle(&records, charts);

    ReportSnapshot {
        records,
        kpis,
        indicators,
        charts,
    }
}

pub fn assemble(
    report_type: ReportType,
    batch: &FetchBatch,
    registry: &IndicatorRegistry,
    charts: &ChartConfig,
) -> ReportSnapshot {
    build_snapshot(report_type, normalize_batch(batch), registry, charts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_report_pipeline::fetch::FetchRoute;
    use crate::shared::data_source::RawPayload;
    use serde_json::json;

    fn batch(entries: Vec<(EndpointKey, serde_json::Value)>) -> FetchBatch {
        let mut batch = FetchBatch {
            requested: entries.len(),
            ..FetchBatch::default()
        };
        for (key, value) in entries {
            batch.routes.insert(key, FetchRoute::Primary);
            batch.payloads.insert(key, RawPayload::from_response(value));
        }
        batch
    }

    #[test]
    fn test_vietnamese_sales_row_end_to_end() {
        let fetched = batch(vec![(
            EndpointKey::SalesSeries,
            json!({"success": true, "data": [{"Ngay": "2024-01-01", "DoanhThu": "1000000", "SoDonHang": "5"}]}),
        )]);
        let snapshot = assemble(
            ReportType::Sales,
            &fetched,
            &IndicatorRegistry::new(),
            &ChartConfig::default(),
        );

        let point = &snapshot.records.sales_series[0];
        assert_eq!(point.date, "2024-01-01");
        assert_eq!(point.revenue, 1_000_000.0);
        assert_eq!(point.orders, 5);
        assert_eq!(snapshot.kpis.total_revenue, 1_000_000.0);
        assert_eq!(snapshot.kpis.total_orders, 5);
        assert_eq!(snapshot.kpis.average_order_value, Some(200_000.0));
        assert!(snapshot.charts.revenue_trend.is_some());
        assert_eq!(snapshot.indicators.len(), 3);
    }

    #[test]
    fn test_cards_published_with_catalog_meta() {
        let fetched = batch(vec![(
            EndpointKey::Campaigns,
            json!([{"TenChienDich": "Tet", "ChiPhi": 100, "DoanhThu": 250}]),
        )]);
        let snapshot = assemble(
            ReportType::Marketing,
            &fetched,
            &IndicatorRegistry::new(),
            &ChartConfig::default(),
        );

        let ids: Vec<&str> = snapshot.indicators.iter().map(|c| c.meta.id.0.as_str()).collect();
        assert_eq!(
            ids,
            vec!["total_revenue", "total_orders", "average_order_value", "campaign_roi"]
        );
        let roi = &snapshot.indicators[3];
        assert_eq!(roi.meta.label, "ROI chiến dịch");
        assert_eq!(roi.value.value, Some(150.0));
        assert_eq!(roi.display.as_deref(), Some("150,0%"));
        // no orders: the average card is a placeholder with no display text
        assert_eq!(snapshot.indicators[2].display, None);
    }

    #[test]
    fn test_procedure_totals_override_series() {
        let fetched = batch(vec![(
            EndpointKey::SalesSeries,
            json!({"DoanhThuCaoNhat": 300, "DoanhThuThapNhat": 100, "TongDoanhThu": 500, "TongDonHang": 4}),
        )]);
        let snapshot = assemble(
            ReportType::Sales,
            &fetched,
            &IndicatorRegistry::new(),
            &ChartConfig::default(),
        );
        assert_eq!(snapshot.kpis.total_revenue, 500.0);
        assert_eq!(snapshot.kpis.total_orders, 4);
        assert!(snapshot.charts.sales_high_low.is_some());
        assert!(snapshot.charts.revenue_trend.is_none());
    }

    #[test]
    fn test_missing_endpoints_leave_records_empty() {
        let snapshot = assemble(
            ReportType::Customers,
            &FetchBatch::default(),
            &IndicatorRegistry::new(),
            &ChartConfig::default(),
        );
        assert_eq!(snapshot.records, ReportRecords::default());
        assert_eq!(snapshot.kpis.average_order_value, None);
        assert_eq!(snapshot.kpis.total_customers, None);
    }
}
