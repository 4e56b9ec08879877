//! Pass 1: water treatment.
//!
//! A powered, watered water processor is processing. Every water endpoint it
//! reaches through watered pipes draws a reduced amount of water.

use dcgrid_core::item::PlacedItem;
use dcgrid_core::module::{ModuleKind, Network};
use dcgrid_core::status::{ItemStatus, Optimization, Treatment};
use dcgrid_network::reachable_endpoints;

use crate::PassContext;
use crate::config::scale_floor;

pub fn compute(items: &[PlacedItem], ctx: &PassContext<'_>) -> Vec<ItemStatus> {
    let mut next: Vec<ItemStatus> = items
        .iter()
        .map(|item| ItemStatus {
            treatment: Treatment::Idle,
            optimization: None,
            ..item.status.clone()
        })
        .collect();

    for (idx, plant) in items.iter().enumerate() {
        if plant.kind() != ModuleKind::WaterProcessor
            || !plant.status.is_powered()
            || !plant.status.is_watered()
        {
            continue;
        }
        next[idx].treatment = Treatment::Processing;

        for n in reachable_endpoints(Network::Water, items, ctx.occupancy, idx) {
            let base = ctx.catalog.spec(items[n].module_id()).water_consumption;
            next[n].optimization = Some(Optimization {
                water_consumption: scale_floor(base, ctx.config.treatment_factor),
            });
        }
    }
    next
}
