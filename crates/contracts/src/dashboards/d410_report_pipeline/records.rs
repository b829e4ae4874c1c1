//! Canonical per-domain records.
//!
//! Every numeric field is finite; unknown values are carried as `None`
//! rather than as a sentinel number.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::kpi::ProcedureTotals;

/// One point of the revenue time series (or a synthetic high/low point)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPoint {
    pub date: String,
    pub revenue: f64,
    pub orders: u64,
}

/// Product sales line. `extras` keeps the original fields of pre-aggregated rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Units sold
    pub sales: u64,
    pub revenue: f64,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSegment {
    pub level: String,
    pub count: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryStatus {
    #[default]
    Normal,
    Low,
    Critical,
    Out,
}

impl InventoryStatus {
    pub fn code(&self) -> &'static str {
        match self {
            InventoryStatus::Normal => "normal",
            InventoryStatus::Low => "low",
            InventoryStatus::Critical => "critical",
            InventoryStatus::Out => "out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAlert {
    pub product: String,
    pub sku: String,
    pub current_stock: i64,
    pub min_stock: i64,
    pub status: InventoryStatus,
}

/// Named financial components of a period. Missing components stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub gross_revenue: Option<f64>,
    pub total_discount: Option<f64>,
    pub net_revenue: Option<f64>,
    pub cost_of_goods: Option<f64>,
    pub gross_profit: Option<f64>,
}

impl FinancialSummary {
    pub fn is_empty(&self) -> bool {
        self.gross_revenue.is_none()
            && self.total_discount.is_none()
            && self.net_revenue.is_none()
            && self.cost_of_goods.is_none()
            && self.gross_profit.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPerformance {
    pub name: String,
    pub channel: String,
    pub spend: f64,
    pub revenue: f64,
    pub conversions: u64,
    /// Return on spend in percent, `None` when nothing was spent
    pub roi: Option<f64>,
}

/// One observed (cohort, month offset) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortObservation {
    pub cohort_key: String,
    pub months_since: u32,
    pub cohort_size: u64,
    pub retained: u64,
    /// Retention in percent
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfmSegment {
    pub segment: String,
    pub customers: u64,
    pub avg_recency_days: f64,
    pub avg_frequency: f64,
    pub avg_monetary: f64,
}

/// Customers grouped by number of purchases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyBucket {
    pub range_label: String,
    pub customers: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherUsage {
    pub code: String,
    pub uses: u64,
    pub discount_total: f64,
    pub revenue: f64,
}

/// Histogram bucket over a half-open range `[min, max)`; `max: None` is unbounded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    pub range_label: String,
    pub min: f64,
    pub max: Option<f64>,
    pub count: u64,
}

/// Every canonical record produced by one fetch cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecords {
    pub sales_series: Vec<SalesPoint>,
    pub procedure_totals: Option<ProcedureTotals>,
    pub products: Vec<ProductSales>,
    pub customer_segments: Vec<CustomerSegment>,
    pub inventory: Vec<InventoryAlert>,
    pub financial: Option<FinancialSummary>,
    pub campaigns: Vec<CampaignPerformance>,
    pub cohorts: Vec<CohortObservation>,
    pub rfm: Vec<RfmSegment>,
    pub frequency: Vec<FrequencyBucket>,
    pub vouchers: Vec<VoucherUsage>,
    pub order_values: Vec<f64>,
}
