//! Connectivity tracer for the power and water networks.
//!
//! A trace starts from every source of a network and walks 4-adjacent items
//! with an explicit stack. Adjacent targets are marked; only conductors
//! (wires, distributors, pipes) carry the walk further. The marked set doubles
//! as the visited set, so rings of conductors terminate.
//!
//! # Design
//!
//! - [`trace`] is pure: it reads the layout and returns the [`Energized`] set.
//! - [`apply`] writes the network flag for every participating item and
//!   reports which flags changed.
//! - Power must be traced before water. A powered water source only counts
//!   as a source while its own power flag is set.

use std::collections::{BTreeSet, HashSet};

use dcgrid_core::id::InstanceId;
use dcgrid_core::item::PlacedItem;
use dcgrid_core::module::{ModuleKind, Network};
use dcgrid_core::occupancy::Occupancy;

// ---------------------------------------------------------------------------
// Energized set
// ---------------------------------------------------------------------------

/// Instances reached by one network trace, sources included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Energized {
    ids: BTreeSet<InstanceId>,
}

impl Energized {
    pub fn contains(&self, id: &InstanceId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstanceId> {
        self.ids.iter()
    }

    fn mark(&mut self, id: &InstanceId) -> bool {
        if self.ids.contains(id) {
            false
        } else {
            self.ids.insert(id.clone())
        }
    }
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Whether `item` currently originates `network`.
pub fn is_source(network: Network, item: &PlacedItem) -> bool {
    if item.position.is_none() || item.dragging {
        return false;
    }
    match item.kind() {
        ModuleKind::WaterSourcePowered if network == Network::Water => item.status.power,
        kind => kind.is_source(network),
    }
}

/// Indices of the items that originate `network`, in collection order.
pub fn sources(network: Network, items: &[PlacedItem]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| is_source(network, item))
        .map(|(idx, _)| idx)
        .collect()
}

/// Compute the set of instances `network` reaches. Reads but never writes.
pub fn trace(network: Network, items: &[PlacedItem]) -> Energized {
    let occupancy = Occupancy::build(items);
    let mut energized = Energized::default();
    let mut stack = Vec::new();

    for idx in sources(network, items) {
        energized.mark(&items[idx].id);
        stack.push(idx);
    }

    while let Some(idx) = stack.pop() {
        for n in occupancy.neighbors(items, idx) {
            let neighbor = &items[n];
            let kind = neighbor.kind();
            if !kind.is_target(network) {
                continue;
            }
            if energized.mark(&neighbor.id) && kind.is_conductor(network) {
                stack.push(n);
            }
        }
    }

    tracing::debug!(
        target: "dcgrid::network",
        %network,
        energized = energized.len(),
        "network.trace"
    );
    energized
}

/// Write `network`'s flag on every participating item from `energized`.
///
/// Power generators are always powered. Items that take no part in the
/// network keep their flag. Returns the ids whose flag changed.
pub fn apply(network: Network, energized: &Energized, items: &mut [PlacedItem]) -> Vec<InstanceId> {
    let mut changed = Vec::new();
    for item in items.iter_mut() {
        let kind = item.kind();
        if !kind.participates(network) {
            continue;
        }
        let value = if network == Network::Power && kind == ModuleKind::PowerGenerator {
            true
        } else {
            energized.contains(&item.id)
        };
        if item.status.carries(network) != value {
            item.status.set_carries(network, value);
            changed.push(item.id.clone());
        }
    }
    changed
}

/// Trace `network` and write the result back.
pub fn trace_and_apply(network: Network, items: &mut [PlacedItem]) -> Vec<InstanceId> {
    let energized = trace(network, items);
    apply(network, &energized, items)
}

/// Endpoints of `network` connected to `items[start]`.
///
/// Walks outward from `start` through conductors whose `network` flag is
/// set and collects every endpoint met on the way, excluding `start` itself.
/// Flags must be current (see [`apply`]).
pub fn reachable_endpoints(
    network: Network,
    items: &[PlacedItem],
    occupancy: &Occupancy,
    start: usize,
) -> Vec<usize> {
    let mut visited = HashSet::from([start]);
    let mut stack = vec![start];
    let mut endpoints = Vec::new();

    while let Some(idx) = stack.pop() {
        for n in occupancy.neighbors(items, idx) {
            if !visited.insert(n) {
                continue;
            }
            let neighbor = &items[n];
            let kind = neighbor.kind();
            if kind.is_conductor(network) {
                if neighbor.status.carries(network) {
                    stack.push(n);
                }
            } else if kind.is_endpoint(network) {
                endpoints.push(n);
            }
        }
    }
    endpoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcgrid_core::test_utils::*;

    fn powered(items: &[PlacedItem]) -> Vec<bool> {
        items.iter().map(|i| i.status.power).collect()
    }

    #[test]
    fn generator_wire_consumer_line() {
        let mut items = vec![
            item_at(1, generator_template(), 0, 0),
            item_at(2, wire_template(), 0, 1),
            item_at(3, consumer_template(), 0, 2),
        ];
        trace_and_apply(Network::Power, &mut items);
        assert_eq!(powered(&items), vec![true, true, true]);

        items.remove(1);
        trace_and_apply(Network::Power, &mut items);
        assert_eq!(powered(&items), vec![true, false]);
    }

    #[test]
    fn consumers_do_not_conduct() {
        let mut items = vec![
            item_at(1, generator_template(), 0, 0),
            item_at(2, consumer_template(), 0, 1),
            item_at(3, consumer_template(), 0, 2),
        ];
        trace_and_apply(Network::Power, &mut items);
        assert_eq!(powered(&items), vec![true, true, false]);
    }

    #[test]
    fn isolated_generator_stays_powered() {
        let mut items = vec![item_at(1, generator_template(), 4, 4)];
        let changed = trace_and_apply(Network::Power, &mut items);
        assert!(items[0].status.power);
        assert_eq!(changed, vec![items[0].id.clone()]);
    }

    #[test]
    fn wire_ring_terminates() {
        // 3x3 ring of wire around an empty centre, fed from one corner.
        let mut items = vec![item_at(0, generator_template(), 0, 0)];
        let mut seq = 1;
        for (r, c) in [(0, 1), (0, 2), (0, 3), (1, 3), (2, 3), (2, 2), (2, 1), (1, 1)] {
            items.push(item_at(seq, wire_template(), r, c));
            seq += 1;
        }
        let energized = trace(Network::Power, &items);
        assert_eq!(energized.len(), items.len());
    }

    #[test]
    fn distributors_conduct_power() {
        let mut items = vec![
            item_at(1, generator_template(), 0, 0),
            item_at(2, breaker_template(), 0, 1),
            item_at(3, transformer_template(), 0, 2),
            item_at(4, consumer_template(), 0, 3),
        ];
        trace_and_apply(Network::Power, &mut items);
        assert!(items.iter().all(|i| i.status.power));
    }

    #[test]
    fn unpowered_pump_waters_nothing() {
        let mut items = vec![
            item_at(1, pump_template(), 0, 0),
            item_at(2, pipe_template(), 0, 1),
            item_at(3, rack_template(), 0, 2),
        ];
        trace_and_apply(Network::Power, &mut items);
        trace_and_apply(Network::Water, &mut items);
        assert!(items.iter().all(|i| !i.status.water));

        // Power the pump and it becomes a source.
        items.push(item_at(4, generator_template(), 1, 0));
        trace_and_apply(Network::Power, &mut items);
        trace_and_apply(Network::Water, &mut items);
        assert!(items[0].status.power);
        assert!(items[0].status.water);
        assert!(items[1].status.water);
        assert!(items[2].status.water);
    }

    #[test]
    fn well_feeds_multi_cell_consumer_through_pipes() {
        let mut items = vec![
            item_at(1, well_template(), 0, 0),
            item_at(2, pipe_template(), 1, 0),
            item_at(3, pipe_template(), 2, 0),
            item_at(4, treatment_plant_template(), 2, 1),
        ];
        trace_and_apply(Network::Water, &mut items);
        assert!(items.iter().all(|i| i.status.water));
    }

    #[test]
    fn trace_is_idempotent() {
        let mut items = vec![
            item_at(1, generator_template(), 0, 0),
            item_at(2, wire_template(), 0, 1),
            item_at(3, rack_template(), 0, 2),
        ];
        trace_and_apply(Network::Power, &mut items);
        let first = powered(&items);
        let changed = trace_and_apply(Network::Power, &mut items);
        assert!(changed.is_empty());
        assert_eq!(powered(&items), first);
    }

    #[test]
    fn reachable_endpoints_follow_energized_conductors() {
        let mut items = vec![
            item_at(1, generator_template(), 0, 0),
            item_at(2, breaker_template(), 0, 1),
            item_at(3, wire_template(), 0, 2),
            item_at(4, consumer_template(), 0, 3),
            item_at(5, consumer_template(), 1, 1),
        ];
        trace_and_apply(Network::Power, &mut items);
        let occupancy = Occupancy::build(&items);
        let mut found = reachable_endpoints(Network::Power, &items, &occupancy, 1);
        found.sort();
        assert_eq!(found, vec![3, 4]);
    }

    #[test]
    fn reachable_endpoints_stop_at_dead_conductors() {
        let mut items = vec![
            item_at(1, breaker_template(), 0, 0),
            item_at(2, wire_template(), 0, 1),
            item_at(3, consumer_template(), 0, 2),
        ];
        // No generator: the wire carries nothing.
        trace_and_apply(Network::Power, &mut items);
        let occupancy = Occupancy::build(&items);
        assert!(reachable_endpoints(Network::Power, &items, &occupancy, 0).is_empty());
    }
}
