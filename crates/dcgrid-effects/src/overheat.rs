//! Pass 4: overheating.
//!
//! Only modules declaring a required water level can overheat. Such a module
//! overheats while it runs (is powered) without enough water, unless a
//! cooler covers the shortfall.

use dcgrid_core::item::PlacedItem;
use dcgrid_core::module::ModuleSpec;
use dcgrid_core::status::ItemStatus;

use crate::PassContext;

pub fn is_overheating(spec: &ModuleSpec, status: &ItemStatus) -> bool {
    let required = spec.required_water_level;
    if required <= 0 || !status.is_powered() {
        return false;
    }
    let starved = !status.is_watered() || spec.water_consumption < required;
    let covered = status.cooling_received().is_some_and(|r| r >= required);
    starved && !covered
}

pub fn compute(items: &[PlacedItem], ctx: &PassContext<'_>) -> Vec<ItemStatus> {
    items
        .iter()
        .map(|item| {
            let spec = ctx.catalog.spec(item.module_id());
            ItemStatus {
                overheating: is_overheating(spec, &item.status),
                ..item.status.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcgrid_core::status::Cooled;

    fn hungry_spec(water: i64) -> ModuleSpec {
        ModuleSpec {
            water_consumption: water,
            required_water_level: 40,
            ..ModuleSpec::named("gpu-rack")
        }
    }

    fn running(water: bool) -> ItemStatus {
        ItemStatus {
            power: true,
            water,
            ..ItemStatus::default()
        }
    }

    #[test]
    fn modules_without_requirement_never_overheat() {
        let spec = ModuleSpec::named("server-rack");
        assert!(!is_overheating(&spec, &running(false)));
    }

    #[test]
    fn unpowered_modules_never_overheat() {
        assert!(!is_overheating(&hungry_spec(0), &ItemStatus::default()));
    }

    #[test]
    fn dry_or_underfed_module_overheats() {
        assert!(is_overheating(&hungry_spec(100), &running(false)));
        assert!(is_overheating(&hungry_spec(10), &running(true)));
        assert!(!is_overheating(&hungry_spec(40), &running(true)));
    }

    #[test]
    fn enough_cooling_prevents_overheating() {
        let mut status = running(false);
        status.cooled = Some(Cooled {
            received: 40,
            reduced_heat: 0,
        });
        assert!(!is_overheating(&hungry_spec(100), &status));

        status.cooled = Some(Cooled {
            received: 39,
            reduced_heat: 1,
        });
        assert!(is_overheating(&hungry_spec(100), &status));
    }
}
