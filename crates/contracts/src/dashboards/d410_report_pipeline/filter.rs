use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::enums::{Period, ReportType};

/// Filter state supplied by the control shell. Every change starts a new fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub report_type: ReportType,
}

impl FilterState {
    pub fn new(
        report_type: ReportType,
        period: Period,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        // Pickers occasionally hand over a reversed range
        let (start_date, end_date) = if start_date <= end_date {
            (start_date, end_date)
        } else {
            (end_date, start_date)
        };
        Self {
            period,
            start_date,
            end_date,
            report_type,
        }
    }

    /// Whole calendar month, grouped by day
    pub fn for_month(report_type: ReportType, year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = last_day_of_month(start)?;
        Some(Self::new(report_type, Period::Day, start, end))
    }

    /// Query string pairs for current-generation GET endpoints
    pub fn query_params(&self) -> Vec<(String, String)> {
        vec![
            ("period".to_string(), self.period.code().to_string()),
            ("startDate".to_string(), format_date(self.start_date)),
            ("endDate".to_string(), format_date(self.end_date)),
            ("reportType".to_string(), self.report_type.code().to_string()),
        ]
    }

    /// JSON body for legacy POST endpoints (Vietnamese parameter names)
    pub fn legacy_body(&self) -> serde_json::Value {
        serde_json::json!({
            "KyBaoCao": self.period.code(),
            "TuNgay": format_date(self.start_date),
            "DenNgay": format_date(self.end_date),
            "LoaiBaoCao": self.report_type.code(),
        })
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_month_leap_february() {
        let filter = FilterState::for_month(ReportType::Sales, 2024, 2).unwrap();
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(filter.end_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_reversed_range_is_swapped() {
        let a = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let filter = FilterState::new(ReportType::Inventory, Period::Day, a, b);
        assert_eq!(filter.start_date, b);
        assert_eq!(filter.end_date, a);
    }

    #[test]
    fn test_query_params() {
        let filter = FilterState::for_month(ReportType::Financial, 2024, 12).unwrap();
        let params = filter.query_params();
        assert!(params.contains(&("startDate".to_string(), "2024-12-01".to_string())));
        assert!(params.contains(&("endDate".to_string(), "2024-12-31".to_string())));
        assert_eq!(filter.legacy_body()["LoaiBaoCao"], "financial");
    }
}
