use contracts::enums::ReportType;
use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn total_revenue() -> IndicatorId {
        IndicatorId::new("total_revenue")
    }
    pub fn total_orders() -> IndicatorId {
        IndicatorId::new("total_orders")
    }
    pub fn average_order_value() -> IndicatorId {
        IndicatorId::new("average_order_value")
    }
    pub fn total_customers() -> IndicatorId {
        IndicatorId::new("total_customers")
    }
    pub fn stock_alerts() -> IndicatorId {
        IndicatorId::new("stock_alerts")
    }
    pub fn campaign_roi() -> IndicatorId {
        IndicatorId::new("campaign_roi")
    }
    pub fn gross_profit() -> IndicatorId {
        IndicatorId::new("gross_profit")
    }
}

fn money() -> ValueFormat {
    ValueFormat::Money {
        currency: "₫".into(),
    }
}

/// Build the full catalogue of KPI cards.
pub fn build_catalog() -> IndicatorCatalog {
    let indicators = vec![
        IndicatorMeta {
            id: ids::total_revenue(),
            label: "Tổng doanh thu".into(),
            short_label: Some("Doanh thu".into()),
            format: money(),
            description: Some("Tổng từ báo cáo, nếu không có thì cộng theo ngày".into()),
        },
        IndicatorMeta {
            id: ids::total_orders(),
            label: "Tổng đơn hàng".into(),
            short_label: Some("Đơn hàng".into()),
            format: ValueFormat::Integer,
            description: None,
        },
        IndicatorMeta {
            id: ids::average_order_value(),
            label: "Giá trị đơn trung bình".into(),
            short_label: Some("AOV".into()),
            format: money(),
            description: Some("Doanh thu / Số đơn hàng".into()),
        },
        IndicatorMeta {
            id: ids::total_customers(),
            label: "Tổng khách hàng".into(),
            short_label: Some("Khách hàng".into()),
            format: ValueFormat::Integer,
            description: Some("Tổng số khách theo phân khúc".into()),
        },
        IndicatorMeta {
            id: ids::stock_alerts(),
            label: "Cảnh báo tồn kho".into(),
            short_label: None,
            format: ValueFormat::Integer,
            description: Some("Sản phẩm sắp hết hoặc đã hết hàng".into()),
        },
        IndicatorMeta {
            id: ids::campaign_roi(),
            label: "ROI chiến dịch".into(),
            short_label: Some("ROI".into()),
            format: ValueFormat::Percent { decimals: 1 },
            description: Some("(Doanh thu - Chi phí) / Chi phí".into()),
        },
        IndicatorMeta {
            id: ids::gross_profit(),
            label: "Lợi nhuận gộp".into(),
            short_label: None,
            format: money(),
            description: None,
        },
    ];

    IndicatorCatalog { indicators }
}

/// Cards shown for a report type, in display order
pub fn indicator_set(report_type: ReportType) -> Vec<IndicatorId> {
    let mut set = vec![
        ids::total_revenue(),
        ids::total_orders(),
        ids::average_order_value(),
    ];
    match report_type {
        ReportType::Sales => {}
        ReportType::Customers => set.push(ids::total_customers()),
        ReportType::Inventory => set.push(ids::stock_alerts()),
        ReportType::Marketing => set.push(ids::campaign_roi()),
        ReportType::Financial => set.push(ids::gross_profit()),
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_set_member_is_in_catalog() {
        let catalog = build_catalog();
        for report_type in ReportType::all() {
            for id in indicator_set(report_type) {
                assert!(
                    catalog.indicators.iter().any(|m| m.id == id),
                    "{} missing from catalog",
                    id.0
                );
            }
        }
    }
}
