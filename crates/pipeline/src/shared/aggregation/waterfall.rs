use contracts::shared::charts::{WaterfallCategory, WaterfallKey, WaterfallStep};

use crate::shared::normalizers::financial::{
    matches_alias, FinancialComponent, GROSS_REVENUE_KEYS, NET_REVENUE_KEYS, TOTAL_DISCOUNT_KEYS,
};

/// Canonical step order with display label and category
const SEQUENCE: &[(WaterfallKey, &str, WaterfallCategory, &[&str])] = &[
    (
        WaterfallKey::GrossRevenue,
        "Doanh thu gộp",
        WaterfallCategory::Total,
        GROSS_REVENUE_KEYS,
    ),
    (
        WaterfallKey::TotalDiscount,
        "Giảm giá",
        WaterfallCategory::Decrease,
        TOTAL_DISCOUNT_KEYS,
    ),
    (
        WaterfallKey::NetRevenue,
        "Doanh thu thuần",
        WaterfallCategory::Total,
        NET_REVENUE_KEYS,
    ),
];

/// Reorder named components into gross → discount → net. Steps missing from
/// the input are omitted, values are magnitudes and unknown keys are ignored.
pub fn sequence(components: &[FinancialComponent]) -> Vec<WaterfallStep> {
    SEQUENCE
        .iter()
        .filter_map(|(key, label, category, aliases)| {
            let component = components
                .iter()
                .find(|c| matches_alias(&c.key, aliases) && c.value.is_finite())?;
            Some(WaterfallStep {
                key: *key,
                label: label.to_string(),
                value: component.value.abs(),
                category: *category,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_and_magnitudes() {
        let steps = sequence(&[
            FinancialComponent::new("netRevenue", 850.0),
            FinancialComponent::new("TongGiamGia", -150.0),
            FinancialComponent::new("DoanhThuGop", 1000.0),
        ]);
        let keys: Vec<WaterfallKey> = steps.iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![
                WaterfallKey::GrossRevenue,
                WaterfallKey::TotalDiscount,
                WaterfallKey::NetRevenue
            ]
        );
        assert_eq!(steps[1].value, 150.0);
        assert_eq!(steps[1].category, WaterfallCategory::Decrease);
    }

    #[test]
    fn test_missing_steps_are_omitted() {
        let steps = sequence(&[
            FinancialComponent::new("grossRevenue", 100.0),
            FinancialComponent::new("costOfGoods", 40.0),
        ]);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].key, WaterfallKey::GrossRevenue);
        assert!(sequence(&[]).is_empty());
    }

    #[test]
    fn test_zero_discount_is_kept() {
        let steps = sequence(&[FinancialComponent::new("totalDiscount", 0.0)]);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].value, 0.0);
    }
}
