use contracts::dashboards::d410_report_pipeline::FinancialSummary;

use crate::shared::data_source::RawPayload;
use crate::shared::field_resolver::{self as fr, RawRow};

pub const GROSS_REVENUE_KEYS: &[&str] = &[
    "grossRevenue",
    "DoanhThuGop",
    "doanhThuGop",
    "gross_revenue",
    "TongDoanhThu",
];
pub const TOTAL_DISCOUNT_KEYS: &[&str] = &[
    "totalDiscount",
    "TongGiamGia",
    "tongGiamGia",
    "total_discount",
    "GiamGia",
];
pub const NET_REVENUE_KEYS: &[&str] = &[
    "netRevenue",
    "DoanhThuThuan",
    "doanhThuThuan",
    "net_revenue",
];
pub const COST_OF_GOODS_KEYS: &[&str] = &["costOfGoods", "GiaVon", "giaVon", "cost_of_goods"];
pub const GROSS_PROFIT_KEYS: &[&str] = &[
    "grossProfit",
    "LoiNhuanGop",
    "loiNhuanGop",
    "gross_profit",
];

/// Component-per-row shape: `[{ThanhPhan: "DoanhThuGop", GiaTri: 100}, ...]`
pub const COMPONENT_NAME_KEYS: &[&str] = &["key", "component", "ThanhPhan", "thanhPhan"];
pub const COMPONENT_VALUE_KEYS: &[&str] = &["value", "GiaTri", "giaTri", "amount"];

/// A named financial delta, as sent by component-per-row endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialComponent {
    pub key: String,
    pub value: f64,
}

impl FinancialComponent {
    pub fn new(key: &str, value: f64) -> Self {
        Self {
            key: key.to_string(),
            value,
        }
    }
}

/// True when `name` is one of `aliases`, ignoring ASCII case
pub fn matches_alias(name: &str, aliases: &[&str]) -> bool {
    aliases.iter().any(|a| a.eq_ignore_ascii_case(name.trim()))
}

fn from_named_row(row: &RawRow) -> FinancialSummary {
    FinancialSummary {
        gross_revenue: fr::resolve_strict(row, GROSS_REVENUE_KEYS),
        total_discount: fr::resolve_strict(row, TOTAL_DISCOUNT_KEYS),
        net_revenue: fr::resolve_strict(row, NET_REVENUE_KEYS),
        cost_of_goods: fr::resolve_strict(row, COST_OF_GOODS_KEYS),
        gross_profit: fr::resolve_strict(row, GROSS_PROFIT_KEYS),
    }
}

fn from_components(components: &[FinancialComponent]) -> FinancialSummary {
    let find = |aliases: &[&str]| {
        components
            .iter()
            .find(|c| matches_alias(&c.key, aliases))
            .map(|c| c.value)
    };
    FinancialSummary {
        gross_revenue: find(GROSS_REVENUE_KEYS),
        total_discount: find(TOTAL_DISCOUNT_KEYS),
        net_revenue: find(NET_REVENUE_KEYS),
        cost_of_goods: find(COST_OF_GOODS_KEYS),
        gross_profit: find(GROSS_PROFIT_KEYS),
    }
}

/// Component rows of a payload; rows without a name are skipped
pub fn components(payload: &RawPayload) -> Vec<FinancialComponent> {
    payload
        .rows()
        .into_iter()
        .filter_map(|row| {
            let key = fr::text_or_none(row, COMPONENT_NAME_KEYS)?;
            Some(FinancialComponent {
                key,
                value: fr::number(row, COMPONENT_VALUE_KEYS),
            })
        })
        .collect()
}

/// Named components of a summary, in declaration order
pub fn summary_components(summary: &FinancialSummary) -> Vec<FinancialComponent> {
    [
        ("grossRevenue", summary.gross_revenue),
        ("totalDiscount", summary.total_discount),
        ("netRevenue", summary.net_revenue),
        ("costOfGoods", summary.cost_of_goods),
        ("grossProfit", summary.gross_profit),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| FinancialComponent::new(key, v)))
    .collect()
}

/// `None` when the payload carries none of the known components
pub fn normalize(payload: &RawPayload) -> Option<FinancialSummary> {
    let component_rows = components(payload);
    let summary = if !component_rows.is_empty() {
        from_components(&component_rows)
    } else {
        payload
            .rows()
            .first()
            .map(|row| from_named_row(row))
            .unwrap_or_default()
    };
    (!summary.is_empty()).then_some(summary)
}
