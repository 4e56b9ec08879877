//! Pass 2: cooler activation and radius cooling.

use dcgrid_core::geometry::distance;
use dcgrid_core::item::PlacedItem;
use dcgrid_core::module::ModuleKind;
use dcgrid_core::status::{Cooled, CoolerState, ItemStatus};

use crate::PassContext;
use crate::config::scale_floor;

/// Operating state of `item` given its current flags. Non-coolers are
/// always inactive.
pub fn cooler_state(item: &PlacedItem, ctx: &PassContext<'_>) -> CoolerState {
    if item.kind() != ModuleKind::CoolingSystem
        || !item.status.is_powered()
        || !item.status.is_watered()
    {
        return CoolerState::Inactive;
    }
    let base = ctx.catalog.spec(item.module_id()).cooling_capacity;
    if item.status.is_optimized() {
        CoolerState::Enhanced {
            base,
            capacity: scale_floor(base, ctx.config.cooler_boost),
        }
    } else {
        CoolerState::Active { capacity: base }
    }
}

/// Cooling delivered by a cooler of `capacity` at `distance` cells.
///
/// Falls off linearly from full capacity at the cooler's centre to zero at
/// `radius`. Zero beyond the radius.
pub fn falloff(capacity: i64, distance: f64, radius: f64) -> i64 {
    if radius <= 0.0 {
        return 0;
    }
    let factor = ((radius - distance) / radius).max(0.0);
    scale_floor(capacity, factor)
}

pub fn compute(items: &[PlacedItem], ctx: &PassContext<'_>) -> Vec<ItemStatus> {
    let states: Vec<CoolerState> = items.iter().map(|item| cooler_state(item, ctx)).collect();
    let radius = ctx.config.cooling_radius;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let mut status = ItemStatus {
                cooling: states[idx],
                cooled: None,
                ..item.status.clone()
            };
            let heat = ctx.catalog.spec(item.module_id()).heat_generation;
            if heat == 0 || item.position.is_none() || item.dragging {
                return status;
            }

            let best = items
                .iter()
                .enumerate()
                .filter(|&(c, _)| c != idx && states[c].is_active())
                .filter_map(|(c, cooler)| {
                    let d = distance(cooler, item);
                    (d <= radius).then(|| falloff(states[c].effective_capacity(), d, radius))
                })
                .max();

            if let Some(received) = best {
                status.cooled = Some(Cooled {
                    received,
                    reduced_heat: (heat - received).max(0),
                });
            }
            status
        })
        .collect()
}
