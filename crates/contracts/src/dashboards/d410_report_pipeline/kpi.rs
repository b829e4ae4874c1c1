use serde::{Deserialize, Serialize};

/// Pre-computed totals returned directly by a backend procedure.
/// When present they win over sums derived from the series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureTotals {
    pub total_revenue: Option<f64>,
    pub total_orders: Option<u64>,
}

impl ProcedureTotals {
    pub fn is_empty(&self) -> bool {
        self.total_revenue.is_none() && self.total_orders.is_none()
    }
}

/// Headline numbers of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSet {
    pub total_revenue: f64,
    pub total_orders: u64,
    /// Only present when `total_orders > 0`
    pub average_order_value: Option<f64>,
    /// `None` both for "no customer data" and for a zero sum
    pub total_customers: Option<u64>,
}
