//! Per-item read-out for the module info panel.

use std::fmt;

use serde::{Deserialize, Serialize};

use dcgrid_core::grid::{GridPosition, Rotation};
use dcgrid_core::id::InstanceId;
use dcgrid_core::item::PlacedItem;
use dcgrid_core::module::{ModuleCatalog, ModuleKind, ModuleSpec, Network};
use dcgrid_core::status::ItemStatus;

/// One line of the status section, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusBadge {
    Overheating,
    Power { powered: bool },
    /// Racks are water cooled, so their water line reads as cooling.
    Water { connected: bool, as_cooling: bool },
    Processing { active: bool },
    Optimized { water_consumption: i64 },
    ActiveCooling { enhanced: bool },
    ReceivingCooling { received: i64 },
    Protected,
    EfficiencyBoosted { bonus_percent: i64 },
    BreakerOverloaded { load: i64, max_capacity: i64 },
}

impl fmt::Display for StatusBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StatusBadge::Overheating => f.write_str("Overheating - Insufficient Cooling"),
            StatusBadge::Power { powered } => {
                let state = if powered { "Powered" } else { "Unpowered" };
                write!(f, "Power Status: {state}")
            }
            StatusBadge::Water {
                connected,
                as_cooling,
            } => {
                let label = if as_cooling { "Cooling Status" } else { "Water Status" };
                let state = match (connected, as_cooling) {
                    (true, true) => "Cooled",
                    (true, false) => "Connected",
                    (false, _) => "No Water",
                };
                write!(f, "{label}: {state}")
            }
            StatusBadge::Processing { active } => {
                let state = if active { "Active" } else { "Inactive" };
                write!(f, "Processing Status: {state}")
            }
            StatusBadge::Optimized { water_consumption } => {
                write!(f, "Optimized Water Usage: {water_consumption}")
            }
            StatusBadge::ActiveCooling { enhanced: true } => {
                f.write_str("Cooling Status: Enhanced Active Cooling")
            }
            StatusBadge::ActiveCooling { enhanced: false } => {
                f.write_str("Cooling Status: Active Cooling")
            }
            StatusBadge::ReceivingCooling { received } => {
                write!(f, "Receiving Cooling: {received} units")
            }
            StatusBadge::Protected => f.write_str("Protected by Circuit Breaker"),
            StatusBadge::EfficiencyBoosted { bonus_percent } => {
                write!(f, "Power Efficiency Boosted by Transformer (+{bonus_percent}%)")
            }
            StatusBadge::BreakerOverloaded { load, max_capacity } => {
                write!(f, "Circuit Overloaded: {load}/{max_capacity}")
            }
        }
    }
}

/// Everything the info panel shows for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    pub id: InstanceId,
    pub label: String,
    pub kind: ModuleKind,
    pub spec: ModuleSpec,
    pub position: Option<GridPosition>,
    pub rotation: Rotation,
    pub status: ItemStatus,
    pub badges: Vec<StatusBadge>,
}

/// Build the info-panel read-out for `item`.
pub fn inspect(item: &PlacedItem, catalog: &ModuleCatalog) -> Inspection {
    Inspection {
        id: item.id.clone(),
        label: item.template.label.clone(),
        kind: item.kind(),
        spec: catalog.spec(item.module_id()).clone(),
        position: item.position,
        rotation: item.rotation,
        status: item.status.clone(),
        badges: badges(item),
    }
}

/// Status lines for `item`. Connectivity lines are hidden while overheating.
pub fn badges(item: &PlacedItem) -> Vec<StatusBadge> {
    let status = &item.status;
    let kind = item.kind();
    let mut out = Vec::new();

    if status.is_overheating() {
        out.push(StatusBadge::Overheating);
    } else {
        if kind.participates(Network::Power) {
            out.push(StatusBadge::Power {
                powered: status.is_powered(),
            });
        }
        if kind.participates(Network::Water) {
            out.push(StatusBadge::Water {
                connected: status.is_watered(),
                as_cooling: kind == ModuleKind::PowerConsumer,
            });
        }
        if kind == ModuleKind::WaterProcessor {
            out.push(StatusBadge::Processing {
                active: status.is_processing(),
            });
        }
        if let Some(water_consumption) = status.optimized_water_consumption() {
            out.push(StatusBadge::Optimized { water_consumption });
        }
    }

    if status.is_active() {
        out.push(StatusBadge::ActiveCooling {
            enhanced: status.enhanced_cooling_capacity().is_some(),
        });
    }
    if let Some(received) = status.cooling_received() {
        out.push(StatusBadge::ReceivingCooling { received });
    }
    if status.is_protected() {
        out.push(StatusBadge::Protected);
    }
    if let Some(bonus_percent) = status.power_efficiency_bonus() {
        out.push(StatusBadge::EfficiencyBoosted { bonus_percent });
    }
    if let Some(b) = status.breaker.filter(|b| b.overloaded) {
        out.push(StatusBadge::BreakerOverloaded {
            load: b.load,
            max_capacity: b.max_capacity,
        });
    }
    out
}
