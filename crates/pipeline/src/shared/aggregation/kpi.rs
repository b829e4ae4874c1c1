use contracts::dashboards::d410_report_pipeline::{
    CustomerSegment, KpiSet, ProcedureTotals, ProductSales, SalesPoint,
};

use super::numeric::{ratio, safe_sum};

/// Total orders, first non-empty source wins:
/// procedure total → Σ series orders → Σ product units → 0.
pub fn resolve_total_orders(
    series: &[SalesPoint],
    products: &[ProductSales],
    totals: Option<&ProcedureTotals>,
) -> u64 {
    if let Some(orders) = totals.and_then(|t| t.total_orders) {
        return orders;
    }
    let series_orders: u64 = series.iter().map(|p| p.orders).sum();
    if series_orders > 0 {
        return series_orders;
    }
    // Units sold stand in for orders when the series has no order counts
    products.iter().map(|p| p.sales).sum()
}

pub fn resolve_total_revenue(series: &[SalesPoint], totals: Option<&ProcedureTotals>) -> f64 {
    totals
        .and_then(|t| t.total_revenue)
        .filter(|v| v.is_finite())
        .unwrap_or_else(|| safe_sum(series, |p| p.revenue))
}

pub fn aggregate(
    series: &[SalesPoint],
    products: &[ProductSales],
    segments: &[CustomerSegment],
    totals: Option<&ProcedureTotals>,
) -> KpiSet {
    let total_revenue = resolve_total_revenue(series, totals);
    let total_orders = resolve_total_orders(series, products, totals);
    let customers: u64 = segments.iter().map(|s| s.count).sum();

    KpiSet {
        total_revenue,
        total_orders,
        average_order_value: ratio(total_revenue, total_orders as f64),
        total_customers: (customers > 0).then_some(customers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn point(revenue: f64, orders: u64) -> SalesPoint {
        SalesPoint {
            date: "2024-01-01".to_string(),
            revenue,
            orders,
        }
    }

    fn product(sales: u64) -> ProductSales {
        ProductSales {
            name: "p".to_string(),
            sku: None,
            sales,
            revenue: 0.0,
            extras: Map::new(),
        }
    }

    #[test]
    fn test_zero_orders_has_no_average() {
        let kpis = aggregate(&[point(100.0, 0)], &[], &[], None);
        assert_eq!(kpis.total_revenue, 100.0);
        assert_eq!(kpis.total_orders, 0);
        assert_eq!(kpis.average_order_value, None);
    }

    #[test]
    fn test_authoritative_revenue_wins() {
        let totals = ProcedureTotals {
            total_revenue: Some(500.0),
            total_orders: None,
        };
        let kpis = aggregate(&[point(200.0, 10)], &[], &[], Some(&totals));
        assert_eq!(kpis.total_revenue, 500.0);
        assert_eq!(kpis.total_orders, 10);
        assert_eq!(kpis.average_order_value, Some(50.0));
    }

    #[test]
    fn test_order_fallback_chain() {
        let totals = ProcedureTotals {
            total_revenue: None,
            total_orders: Some(3),
        };
        assert_eq!(resolve_total_orders(&[point(1.0, 7)], &[product(9)], Some(&totals)), 3);
        assert_eq!(resolve_total_orders(&[point(1.0, 7)], &[product(9)], None), 7);
        assert_eq!(resolve_total_orders(&[point(1.0, 0)], &[product(4), product(5)], None), 9);
        assert_eq!(resolve_total_orders(&[], &[], None), 0);
    }

    #[test]
    fn test_total_customers() {
        let segments = vec![
            CustomerSegment {
                level: "VIP".to_string(),
                count: 2,
                revenue: 0.0,
            },
            CustomerSegment {
                level: "Moi".to_string(),
                count: 3,
                revenue: 0.0,
            },
        ];
        assert_eq!(aggregate(&[], &[], &segments, None).total_customers, Some(5));
        let zero = vec![CustomerSegment {
            level: "VIP".to_string(),
            count: 0,
            revenue: 0.0,
        }];
        assert_eq!(aggregate(&[], &[], &zero, None).total_customers, None);
        assert_eq!(aggregate(&[], &[], &[], None).total_customers, None);
    }

    #[test]
    fn test_end_to_end_average() {
        let kpis = aggregate(&[point(1_000_000.0, 5)], &[], &[], None);
        assert_eq!(kpis.total_revenue, 1_000_000.0);
        assert_eq!(kpis.total_orders, 5);
        assert_eq!(kpis.average_order_value, Some(200_000.0));
    }
}
