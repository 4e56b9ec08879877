//! Derived-effects resolver.
//!
//! Runs after both network traces. Four passes layer effects on top of the
//! connectivity flags, always in the same order:
//!
//! 1. [`treatment`] -- water processors and the consumers they optimize.
//! 2. [`cooling`] -- cooler activation and radius cooling.
//! 3. [`circuit`] -- breaker protection/overload and transformer boosts.
//! 4. [`overheat`] -- modules starved of water and not cooled enough.
//!
//! Each pass reads the statuses left by the previous one and returns a full
//! set of next statuses. [`commit`] writes back only the entries that differ,
//! so a pass that changes nothing leaves the collection untouched.

use dcgrid_core::id::InstanceId;
use dcgrid_core::item::PlacedItem;
use dcgrid_core::module::ModuleCatalog;
use dcgrid_core::occupancy::Occupancy;
use dcgrid_core::status::ItemStatus;

pub mod circuit;
pub mod config;
pub mod cooling;
pub mod overheat;
pub mod treatment;

pub use config::EffectsConfig;

/// Read-only inputs shared by every pass.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    pub catalog: &'a ModuleCatalog,
    pub config: &'a EffectsConfig,
    pub occupancy: &'a Occupancy,
}

impl<'a> PassContext<'a> {
    pub fn new(
        catalog: &'a ModuleCatalog,
        config: &'a EffectsConfig,
        occupancy: &'a Occupancy,
    ) -> Self {
        Self {
            catalog,
            config,
            occupancy,
        }
    }
}

/// One stage of the effects pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectPass {
    Treatment,
    Cooling,
    Circuit,
    Overheat,
}

impl EffectPass {
    /// Execution order.
    pub const ORDER: [EffectPass; 4] = [
        EffectPass::Treatment,
        EffectPass::Cooling,
        EffectPass::Circuit,
        EffectPass::Overheat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectPass::Treatment => "treatment",
            EffectPass::Cooling => "cooling",
            EffectPass::Circuit => "circuit",
            EffectPass::Overheat => "overheat",
        }
    }

    /// Next statuses for every item, index-aligned with `items`.
    pub fn compute(self, items: &[PlacedItem], ctx: &PassContext<'_>) -> Vec<ItemStatus> {
        match self {
            EffectPass::Treatment => treatment::compute(items, ctx),
            EffectPass::Cooling => cooling::compute(items, ctx),
            EffectPass::Circuit => circuit::compute(items, ctx),
            EffectPass::Overheat => overheat::compute(items, ctx),
        }
    }
}

/// Write `next` back into `items`, skipping entries that are unchanged.
/// Returns the ids of items whose status changed.
pub fn commit(items: &mut [PlacedItem], next: Vec<ItemStatus>) -> Vec<InstanceId> {
    let mut changed = Vec::new();
    for (item, status) in items.iter_mut().zip(next) {
        if item.status != status {
            item.status = status;
            changed.push(item.id.clone());
        }
    }
    changed
}

/// What each pass changed during one [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectsReport {
    pub passes: Vec<(EffectPass, Vec<InstanceId>)>,
}

impl EffectsReport {
    pub fn changed(&self, pass: EffectPass) -> &[InstanceId] {
        self.passes
            .iter()
            .find(|(p, _)| *p == pass)
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_changed(&self) -> usize {
        self.passes.iter().map(|(_, ids)| ids.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_changed() == 0
    }
}

/// Run all four passes over `items`. Network flags must already be current.
pub fn resolve(
    items: &mut [PlacedItem],
    catalog: &ModuleCatalog,
    config: &EffectsConfig,
) -> EffectsReport {
    let occupancy = Occupancy::build(items);
    let mut report = EffectsReport::default();

    for pass in EffectPass::ORDER {
        let next = {
            let ctx = PassContext::new(catalog, config, &occupancy);
            pass.compute(items, &ctx)
        };
        let changed = commit(items, next);
        tracing::debug!(
            target: "dcgrid::effects",
            pass = pass.name(),
            changed = changed.len(),
            "effects.pass"
        );
        report.passes.push((pass, changed));
    }
    report
}
