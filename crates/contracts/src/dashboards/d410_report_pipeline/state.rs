use serde::{Deserialize, Serialize};

use super::filter::FilterState;
use super::kpi::KpiSet;
use super::records::ReportRecords;
use crate::shared::charts::ChartBundle;
use crate::shared::indicators::IndicatorCard;

/// Everything derived from one settled fetch cycle. Published as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub records: ReportRecords,
    pub kpis: KpiSet,
    pub indicators: Vec<IndicatorCard>,
    pub charts: ChartBundle,
}

/// What the View observes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    /// Filter of the latest issued cycle
    pub filter: Option<FilterState>,
    /// Last successfully settled report; kept when a later cycle fails
    pub report: Option<ReportSnapshot>,
    /// Filter the current `report` was computed for
    pub report_filter: Option<FilterState>,
    pub loading: bool,
    pub error: Option<String>,
    /// Generation of the cycle that last wrote this state
    pub generation: u64,
}
