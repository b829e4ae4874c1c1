use contracts::shared::indicators::*;
use std::collections::HashMap;

use super::compute::{self, IndicatorContext};
use super::metadata::{build_catalog, ids};
use crate::shared::format::format_value;

type ComputeFn = fn(&IndicatorContext) -> IndicatorValue;

/// Central registry: maps `IndicatorId` to its compute function and its
/// catalogue entry.
pub struct IndicatorRegistry {
    fns: HashMap<String, ComputeFn>,
    meta: HashMap<String, IndicatorMeta>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(ids::total_revenue().0, compute::compute_total_revenue);
        fns.insert(ids::total_orders().0, compute::compute_total_orders);
        fns.insert(
            ids::average_order_value().0,
            compute::compute_average_order_value,
        );
        fns.insert(ids::total_customers().0, compute::compute_total_customers);
        fns.insert(ids::stock_alerts().0, compute::compute_stock_alerts);
        fns.insert(ids::campaign_roi().0, compute::compute_campaign_roi);
        fns.insert(ids::gross_profit().0, compute::compute_gross_profit);

        let meta = build_catalog()
            .indicators
            .into_iter()
            .map(|m| (m.id.0.clone(), m))
            .collect();

        Self { fns, meta }
    }

    /// Compute a batch of cards in the requested order; unknown ids are skipped.
    pub fn compute(&self, ids: &[IndicatorId], ctx: &IndicatorContext) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            if let Some(compute_fn) = self.fns.get(&id.0) {
                let mut value = compute_fn(ctx);
                if value.value.is_some_and(|v| !v.is_finite()) {
                    value.value = None;
                }
                results.push(value);
            } else {
                tracing::warn!("indicator {} not found in registry", id.0);
            }
        }

        results
    }

    /// Compute cards and attach their catalogue metadata and display text.
    /// Cards without a catalogue entry are skipped.
    pub fn cards(&self, ids: &[IndicatorId], ctx: &IndicatorContext) -> Vec<IndicatorCard> {
        self.compute(ids, ctx)
            .into_iter()
            .filter_map(|value| {
                let Some(meta) = self.meta.get(&value.id.0) else {
                    tracing::warn!("indicator {} has no catalogue entry", value.id.0);
                    return None;
                };
                Some(IndicatorCard {
                    display: value.value.map(|v| format_value(v, &meta.format)),
                    meta: meta.clone(),
                    value,
                })
            })
            .collect()
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
