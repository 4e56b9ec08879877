//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::grid::{Footprint, GridPosition};
use crate::id::{InstanceId, ModuleId};
use crate::item::PlacedItem;
use crate::module::{DistributorRole, ModuleCatalog, ModuleKind, ModuleSpec};
use crate::template::{EquipmentTemplate, Palette};

// ===========================================================================
// Templates
// ===========================================================================

pub fn generator_template() -> EquipmentTemplate {
    EquipmentTemplate::new(
        "diesel-generator",
        "Diesel Generator",
        ModuleKind::PowerGenerator,
        Footprint::single(),
    )
}

pub fn wire_template() -> EquipmentTemplate {
    EquipmentTemplate::new(
        "power-wire",
        "Power Wire",
        ModuleKind::PowerWire,
        Footprint::single(),
    )
}

/// 1 wide, 2 tall.
pub fn rack_template() -> EquipmentTemplate {
    EquipmentTemplate::new(
        "server-rack",
        "Server Rack",
        ModuleKind::PowerConsumer,
        Footprint::new(1, 2),
    )
}

pub fn consumer_template() -> EquipmentTemplate {
    EquipmentTemplate::new(
        "network-switch",
        "Network Switch",
        ModuleKind::PowerConsumer,
        Footprint::single(),
    )
}

pub fn pipe_template() -> EquipmentTemplate {
    EquipmentTemplate::new(
        "water-pipe",
        "Water Pipe",
        ModuleKind::WaterPipe,
        Footprint::single(),
    )
}

pub fn well_template() -> EquipmentTemplate {
    EquipmentTemplate::new(
        "water-well",
        "Water Well",
        ModuleKind::WaterSource,
        Footprint::single(),
    )
}

pub fn pump_template() -> EquipmentTemplate {
    EquipmentTemplate::new(
        "water-pump",
        "Water Pump",
        ModuleKind::WaterSourcePowered,
        Footprint::single(),
    )
}

/// 2x2.
pub fn treatment_plant_template() -> EquipmentTemplate {
    EquipmentTemplate::new(
        "water-treatment-plant",
        "Water Treatment Plant",
        ModuleKind::WaterProcessor,
        Footprint::new(2, 2),
    )
}

pub fn cooler_template() -> EquipmentTemplate {
    EquipmentTemplate::new(
        "water-cooler",
        "Water Cooler",
        ModuleKind::CoolingSystem,
        Footprint::single(),
    )
}

pub fn breaker_template() -> EquipmentTemplate {
    EquipmentTemplate::new(
        "circuit-breaker",
        "Circuit Breaker",
        ModuleKind::PowerDistributor,
        Footprint::single(),
    )
    .with_role(DistributorRole::CircuitBreaker)
}

pub fn transformer_template() -> EquipmentTemplate {
    EquipmentTemplate::new(
        "hackupc-transformer",
        "Transformer",
        ModuleKind::PowerDistributor,
        Footprint::single(),
    )
    .with_role(DistributorRole::Transformer)
}

/// Every template helper above, in declaration order.
pub fn sample_palette() -> Palette {
    let templates = vec![
        generator_template(),
        wire_template(),
        rack_template(),
        consumer_template(),
        pipe_template(),
        well_template(),
        pump_template(),
        treatment_plant_template(),
        cooler_template(),
        breaker_template(),
        transformer_template(),
    ];
    match Palette::new(templates) {
        Ok(palette) => palette,
        Err(e) => panic!("sample palette is invalid: {e}"),
    }
}

// ===========================================================================
// Items
// ===========================================================================

/// Place a copy of `template` at `(row, col)` with instance sequence `seq`.
pub fn item_at(seq: u64, template: EquipmentTemplate, row: i32, col: i32) -> PlacedItem {
    let id = InstanceId::new(template.id.clone(), seq);
    PlacedItem::new(id, template).at(GridPosition::new(row, col))
}

/// Find an item by `(module, seq)`. Panics if absent.
pub fn find<'a>(items: &'a [PlacedItem], module: &str, seq: u64) -> &'a PlacedItem {
    let id = InstanceId::new(ModuleId::from(module), seq);
    items
        .iter()
        .find(|i| i.id == id)
        .unwrap_or_else(|| panic!("no item {id}"))
}

// ===========================================================================
// Specs
// ===========================================================================

pub fn spec(id: &str) -> ModuleSpec {
    ModuleSpec::named(id)
}

/// A catalog matching the template helpers above, with round-number ratings.
pub fn sample_catalog() -> ModuleCatalog {
    [
        ModuleSpec {
            power_generation: 1000,
            heat_generation: 30,
            ..spec("diesel-generator")
        },
        spec("power-wire"),
        ModuleSpec {
            power_consumption: 100,
            water_consumption: 100,
            heat_generation: 50,
            storage_capacity: 10,
            processing_power: 20,
            ..spec("server-rack")
        },
        ModuleSpec {
            power_consumption: 20,
            heat_generation: 5,
            ..spec("network-switch")
        },
        spec("water-pipe"),
        ModuleSpec {
            water_generation: 500,
            ..spec("water-well")
        },
        ModuleSpec {
            power_consumption: 50,
            water_generation: 800,
            ..spec("water-pump")
        },
        ModuleSpec {
            power_consumption: 150,
            water_consumption: 40,
            ..spec("water-treatment-plant")
        },
        ModuleSpec {
            power_consumption: 60,
            water_consumption: 30,
            cooling_capacity: 90,
            ..spec("water-cooler")
        },
        ModuleSpec {
            max_capacity: 400,
            ..spec("circuit-breaker")
        },
        spec("hackupc-transformer"),
    ]
    .into_iter()
    .collect()
}
