//! Pass 3: circuit breaker protection and transformer efficiency.

use dcgrid_core::item::PlacedItem;
use dcgrid_core::module::Network;
use dcgrid_core::status::{BreakerLoad, EfficiencyBoost, ItemStatus};
use dcgrid_network::reachable_endpoints;

use crate::PassContext;

/// Breaker capacity for `item`, substituting the configured default when the
/// module declares none.
pub fn breaker_capacity(item: &PlacedItem, ctx: &PassContext<'_>) -> i64 {
    match ctx.catalog.spec(item.module_id()).max_capacity {
        cap if cap > 0 => cap,
        _ => ctx.config.default_breaker_capacity,
    }
}

pub fn compute(items: &[PlacedItem], ctx: &PassContext<'_>) -> Vec<ItemStatus> {
    let mut next: Vec<ItemStatus> = items
        .iter()
        .map(|item| ItemStatus {
            breaker: None,
            protected: false,
            boost: None,
            ..item.status.clone()
        })
        .collect();

    for (idx, item) in items.iter().enumerate() {
        if !item.status.is_powered() {
            continue;
        }

        if item.template.is_circuit_breaker() {
            let endpoints = reachable_endpoints(Network::Power, items, ctx.occupancy, idx);
            let load: i64 = endpoints
                .iter()
                .map(|&n| ctx.catalog.spec(items[n].module_id()).power_consumption)
                .sum();
            let max_capacity = breaker_capacity(item, ctx);
            let overloaded = load > max_capacity;
            next[idx].breaker = Some(BreakerLoad {
                load,
                max_capacity,
                overloaded,
            });
            if !overloaded {
                for n in endpoints {
                    next[n].protected = true;
                }
            }
        } else if item.template.is_transformer() {
            for n in reachable_endpoints(Network::Power, items, ctx.occupancy, idx) {
                if ctx.catalog.spec(items[n].module_id()).power_consumption != 0 {
                    next[n].boost = Some(EfficiencyBoost {
                        bonus_percent: ctx.config.transformer_bonus_percent,
                    });
                }
            }
        }
    }
    next
}
