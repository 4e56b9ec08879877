//! Layout statistics: the totals shown in the stats bar, and the per-item
//! read-out shown in the info panel ([`inspect`]).
//!
//! # Usage
//!
//! ```ignore
//! let stats = dcgrid_stats::aggregate(designer.items(), designer.catalog());
//! println!("net power {}", stats.net_power());
//! ```
//!
//! An item that takes no part in a network counts as connected to it. A
//! water well, for instance, is treated as powered. Items whose module has
//! no catalog entry, and items not yet on the grid, are skipped.

use serde::{Deserialize, Serialize};

use dcgrid_core::item::PlacedItem;
use dcgrid_core::module::{ModuleCatalog, ModuleKind, Network};

pub mod inspect;

pub use inspect::{Inspection, StatusBadge, inspect};

// ---------------------------------------------------------------------------
// Aggregate stats
// ---------------------------------------------------------------------------

/// Totals across every placed item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub power_generation: i64,
    pub power_consumption: i64,
    /// Draw avoided through transformer efficiency boosts.
    pub power_savings: i64,
    pub storage_capacity: i64,
    pub processing_power: i64,
    pub water_generation: i64,
    pub water_consumption: i64,
    /// Draw avoided through treated water.
    pub water_savings: i64,
    pub cooling_capacity: i64,
    pub heat_generation: i64,
    /// Heat removed by nearby coolers.
    pub heat_reduction: i64,
    pub protected_components: u32,
}

impl AggregateStats {
    pub fn net_power(&self) -> i64 {
        self.power_generation - self.power_consumption
    }

    pub fn net_water(&self) -> i64 {
        self.water_generation - self.water_consumption
    }

    pub fn net_thermal(&self) -> i64 {
        self.cooling_capacity - self.heat_generation
    }
}

/// Whether `item` counts as connected to `network` for the totals.
fn connected(item: &PlacedItem, network: Network) -> bool {
    !item.kind().participates(network) || item.status.carries(network)
}

/// Compute stats-bar totals for `items`.
pub fn aggregate(items: &[PlacedItem], catalog: &ModuleCatalog) -> AggregateStats {
    let mut acc = AggregateStats::default();

    for item in items {
        if item.position.is_none() {
            continue;
        }
        let Some(spec) = catalog.get(item.module_id()) else {
            continue;
        };
        let status = &item.status;
        let kind = item.kind();
        let powered = connected(item, Network::Power);
        let watered = connected(item, Network::Water);
        let running = powered && !status.is_overheating();

        if kind == ModuleKind::PowerGenerator && running {
            acc.power_generation += spec.power_generation;
        }

        if powered {
            match status.boost {
                Some(boost) => {
                    let reduction = boost.reduction(spec.power_consumption);
                    acc.power_consumption += spec.power_consumption - reduction;
                    acc.power_savings += reduction;
                }
                None => acc.power_consumption += spec.power_consumption,
            }
        }

        if running {
            acc.storage_capacity += spec.storage_capacity.max(0);
            acc.processing_power += spec.processing_power.max(0);
        }

        if !status.is_overheating() {
            let producing = match kind {
                ModuleKind::WaterSource => true,
                ModuleKind::WaterSourcePowered => powered,
                _ => false,
            };
            if producing {
                acc.water_generation += spec.water_generation;
            }
        }

        if running && watered && kind.is_endpoint(Network::Water) {
            match status.optimized_water_consumption() {
                Some(optimized) => {
                    acc.water_consumption += optimized;
                    acc.water_savings += spec.water_consumption - optimized;
                }
                None => acc.water_consumption += spec.water_consumption,
            }
        }

        if running {
            // Coolers count what they deliver: nothing while inactive, the
            // boosted figure on treated water. Other modules count their rating.
            acc.cooling_capacity += match kind {
                ModuleKind::CoolingSystem => status.cooling.effective_capacity(),
                _ => spec.cooling_capacity,
            };
            match status.reduced_heat_generation() {
                Some(reduced) => {
                    acc.heat_generation += reduced;
                    acc.heat_reduction += spec.heat_generation - reduced;
                }
                None => acc.heat_generation += spec.heat_generation,
            }
        }

        if status.is_protected() {
            acc.protected_components += 1;
        }
    }
    acc
}
