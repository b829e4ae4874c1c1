use contracts::dashboards::d410_report_pipeline::{ProductSales, ReportRecords, SalesPoint};
use contracts::shared::charts::{ChartBundle, Dimensions, LineChartSpec, Point};

use super::bar::{layout_bars, layout_histogram, layout_horizontal_bars, BarSeries};
use super::donut::layout_donut;
use super::heatmap::layout_cohort_heatmap;
use super::line::{layout_category_line, layout_time_series, timestamp_of, TimePoint};
use super::scale::ScaleConfig;
use super::waterfall::layout_waterfall;
use crate::shared::aggregation::cohort_matrix::build_matrix;
use crate::shared::aggregation::histogram::{bucketize, ORDER_VALUE_RANGES};
use crate::shared::aggregation::waterfall::sequence;
use crate::shared::config::ChartConfig;
use crate::shared::normalizers::financial::summary_components;
use crate::shared::normalizers::sales::{HIGH_LABEL, LOW_LABEL};

/// Ranked product chart shows this many products
pub const TOP_PRODUCTS: usize = 10;

fn is_high_low(series: &[SalesPoint]) -> bool {
    series.len() == 2 && series[0].date == HIGH_LABEL && series[1].date == LOW_LABEL
}

/// Time axis when every date parses, evenly spaced categories otherwise
fn revenue_trend(series: &[SalesPoint], dims: &Dimensions, scale: &ScaleConfig) -> LineChartSpec {
    let timed: Option<Vec<TimePoint>> = series
        .iter()
        .map(|p| {
            Some(TimePoint {
                timestamp: timestamp_of(&p.date)?,
                value: p.revenue,
            })
        })
        .collect();
    match timed {
        Some(points) => layout_time_series(&points, dims, scale),
        None => {
            let values: Vec<f64> = series.iter().map(|p| p.revenue).collect();
            layout_category_line(&values, dims, scale)
        }
    }
}

fn top_products(products: &[ProductSales]) -> Vec<&ProductSales> {
    let mut ranked: Vec<&ProductSales> = products.iter().collect();
    ranked.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| b.sales.cmp(&a.sales))
    });
    ranked.truncate(TOP_PRODUCTS);
    ranked
}

fn labels<T>(items: &[T], label: impl Fn(&T) -> String) -> Vec<String> {
    items.iter().map(label).collect()
}

/// Build every chart the records support. Charts whose records are empty
/// stay `None`.
pub fn build_bundle(records: &ReportRecords, config: &ChartConfig) -> ChartBundle {
    let dims = config.dimensions();
    let scale = ScaleConfig {
        min_bar_height: config.min_bar_height.max(0.0),
        ..ScaleConfig::default()
    };
    let center = Point {
        x: dims.width / 2.0,
        y: dims.height / 2.0,
    };
    let outer = (dims.width.min(dims.height) / 2.0 - config.padding).max(0.0);
    let inner = outer * config.donut_inner_ratio.clamp(0.0, 0.95);

    let mut bundle = ChartBundle::default();

    let series = &records.sales_series;
    if is_high_low(series) {
        bundle.sales_high_low = Some(layout_bars(
            &labels(series, |p| p.date.clone()),
            &[BarSeries::new(
                "Doanh thu",
                series.iter().map(|p| p.revenue).collect(),
            )],
            &dims,
            &scale,
        ));
    } else if !series.is_empty() {
        bundle.revenue_trend = Some(revenue_trend(series, &dims, &scale));
    }

    if !records.products.is_empty() {
        let top = top_products(&records.products);
        bundle.top_products = Some(layout_horizontal_bars(
            &top.iter().map(|p| p.name.clone()).collect::<Vec<_>>(),
            &BarSeries::new("Doanh thu", top.iter().map(|p| p.revenue).collect()),
            &dims,
            &scale,
        ));
    }

    if !records.customer_segments.is_empty() {
        let shares: Vec<(String, f64)> = records
            .customer_segments
            .iter()
            .map(|s| (s.level.clone(), s.count as f64))
            .collect();
        let donut = layout_donut(&shares, center, outer, inner);
        bundle.customer_segments = (!donut.slices.is_empty()).then_some(donut);
    }

    if !records.order_values.is_empty() {
        let buckets = bucketize(&records.order_values, ORDER_VALUE_RANGES);
        bundle.order_value_histogram =
            Some(layout_histogram("Số đơn", &buckets, &dims, &scale));
    }

    if !records.frequency.is_empty() {
        bundle.purchase_frequency = Some(layout_bars(
            &labels(&records.frequency, |b| b.range_label.clone()),
            &[BarSeries::new(
                "Khách hàng",
                records.frequency.iter().map(|b| b.customers as f64).collect(),
            )],
            &dims,
            &scale,
        ));
    }

    if !records.cohorts.is_empty() {
        let matrix = build_matrix(&records.cohorts);
        bundle.cohort_retention = Some(layout_cohort_heatmap(&matrix, &dims));
    }

    if !records.rfm.is_empty() {
        let shares: Vec<(String, f64)> = records
            .rfm
            .iter()
            .map(|s| (s.segment.clone(), s.customers as f64))
            .collect();
        let donut = layout_donut(&shares, center, outer, inner);
        bundle.rfm_segments = (!donut.slices.is_empty()).then_some(donut);
    }

    if !records.inventory.is_empty() {
        let inventory = &records.inventory;
        bundle.inventory_levels = Some(layout_bars(
            &labels(inventory, |a| a.product.clone()),
            &[
                BarSeries::new(
                    "Tồn hiện tại",
                    inventory.iter().map(|a| a.current_stock as f64).collect(),
                ),
                BarSeries::new(
                    "Tồn tối thiểu",
                    inventory.iter().map(|a| a.min_stock as f64).collect(),
                ),
            ],
            &dims,
            &scale,
        ));
    }

    if !records.campaigns.is_empty() {
        let campaigns = &records.campaigns;
        bundle.campaign_performance = Some(layout_bars(
            &labels(campaigns, |c| c.name.clone()),
            &[
                BarSeries::new("Chi phí", campaigns.iter().map(|c| c.spend).collect()),
                BarSeries::new("Doanh thu", campaigns.iter().map(|c| c.revenue).collect()),
            ],
            &dims,
            &scale,
        ));
    }

    if !records.vouchers.is_empty() {
        bundle.voucher_usage = Some(layout_bars(
            &labels(&records.vouchers, |v| v.code.clone()),
            &[BarSeries::new(
                "Lượt dùng",
                records.vouchers.iter().map(|v| v.uses as f64).collect(),
            )],
            &dims,
            &scale,
        ));
    }

    if let Some(summary) = &records.financial {
        let steps = sequence(&summary_components(summary));
        if !steps.is_empty() {
            bundle.revenue_waterfall = Some(layout_waterfall(&steps, &dims, &scale));
        }
    }

    bundle
}
