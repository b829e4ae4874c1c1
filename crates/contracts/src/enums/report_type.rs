use serde::{Deserialize, Serialize};

/// Report families the dashboard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Sales,
    Customers,
    Inventory,
    Marketing,
    Financial,
}

impl ReportType {
    /// Code used in query strings and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            ReportType::Sales => "sales",
            ReportType::Customers => "customers",
            ReportType::Inventory => "inventory",
            ReportType::Marketing => "marketing",
            ReportType::Financial => "financial",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReportType::Sales => "Doanh thu",
            ReportType::Customers => "Khách hàng",
            ReportType::Inventory => "Tồn kho",
            ReportType::Marketing => "Marketing",
            ReportType::Financial => "Tài chính",
        }
    }

    pub fn all() -> Vec<ReportType> {
        vec![
            ReportType::Sales,
            ReportType::Customers,
            ReportType::Inventory,
            ReportType::Marketing,
            ReportType::Financial,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "sales" => Some(ReportType::Sales),
            "customers" => Some(ReportType::Customers),
            "inventory" => Some(ReportType::Inventory),
            "marketing" => Some(ReportType::Marketing),
            "financial" => Some(ReportType::Financial),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Granularity the backend groups time series by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
    Year,
    Custom,
}

impl Period {
    pub fn code(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
            Period::Custom => "custom",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "day" => Some(Period::Day),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            "quarter" => Some(Period::Quarter),
            "year" => Some(Period::Year),
            "custom" => Some(Period::Custom),
            _ => None,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
