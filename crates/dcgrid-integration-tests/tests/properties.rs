//! Property-based tests for placement and network tracing.
//!
//! Uses proptest to generate random layouts and intent sequences, then
//! verifies structural invariants hold after every step.

use std::collections::BTreeSet;

use dcgrid_core::geometry::{adjacent_cells, in_bounds, items_at, overlaps};
use dcgrid_core::grid::{Footprint, GridDimensions, GridPosition};
use dcgrid_core::id::{InstanceId, ModuleId};
use dcgrid_core::item::PlacedItem;
use dcgrid_core::module::{ModuleKind, Network};
use dcgrid_core::placement;
use dcgrid_core::test_utils::*;
use dcgrid_effects::cooling::falloff;
use dcgrid_engine::{Designer, DesignerConfig};
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

const TEMPLATES: [&str; 11] = [
    "diesel-generator",
    "power-wire",
    "server-rack",
    "network-switch",
    "water-pipe",
    "water-well",
    "water-pump",
    "water-treatment-plant",
    "water-cooler",
    "circuit-breaker",
    "hackupc-transformer",
];

fn small_grid() -> DesignerConfig {
    DesignerConfig {
        grid: GridDimensions::new(8, 8),
        ..DesignerConfig::default()
    }
}

#[derive(Debug, Clone)]
enum Op {
    Place(usize, i32, i32),
    Move(usize, i32, i32),
    BeginDrag(usize),
    CancelDrag(usize),
    Remove(usize),
    Rotate(usize),
}

fn arb_ops(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            4 => (0..TEMPLATES.len(), -1..9i32, -1..9i32)
                .prop_map(|(t, r, c)| Op::Place(t, r, c)),
            2 => (0..64usize, -1..9i32, -1..9i32).prop_map(|(i, r, c)| Op::Move(i, r, c)),
            2 => (0..64usize).prop_map(Op::BeginDrag),
            1 => (0..64usize).prop_map(Op::CancelDrag),
            1 => (0..64usize).prop_map(Op::Remove),
            1 => (0..64usize).prop_map(Op::Rotate),
        ],
        1..=max_ops,
    )
}

fn nth_id(d: &Designer, n: usize) -> Option<InstanceId> {
    let items = d.items();
    (!items.is_empty()).then(|| items[n % items.len()].id.clone())
}

fn apply(d: &mut Designer, op: &Op) {
    // Rejections are expected; the invariants must hold either way.
    let _ = match *op {
        Op::Place(t, r, c) => d.place(&ModuleId::from(TEMPLATES[t]), r, c).map(|_| ()),
        Op::Move(n, r, c) => match nth_id(d, n) {
            Some(id) => d.begin_drag(&id).and_then(|_| d.move_item(&id, r, c).map(|_| ())),
            None => Ok(()),
        },
        Op::BeginDrag(n) => match nth_id(d, n) {
            Some(id) => d.begin_drag(&id),
            None => Ok(()),
        },
        Op::CancelDrag(n) => match nth_id(d, n) {
            Some(id) => d.cancel_drag(&id),
            None => Ok(()),
        },
        Op::Remove(n) => match nth_id(d, n) {
            Some(id) => d.remove(&id).map(|_| ()),
            None => Ok(()),
        },
        Op::Rotate(n) => match nth_id(d, n) {
            Some(id) => d.rotate(&id).map(|_| ()),
            None => Ok(()),
        },
    };
}

/// Put every lifted item back and bring statuses up to date.
fn settle(d: &mut Designer) {
    let lifted: Vec<InstanceId> = d
        .items()
        .iter()
        .filter(|i| i.dragging)
        .map(|i| i.id.clone())
        .collect();
    for id in &lifted {
        let _ = d.cancel_drag(id);
    }
    d.recompute();
}

/// Independent reference for power reachability: flood conductors from the
/// generators using only geometry queries.
fn reference_powered(items: &[PlacedItem]) -> BTreeSet<InstanceId> {
    let mut powered = BTreeSet::new();
    let mut frontier: Vec<&PlacedItem> = items
        .iter()
        .filter(|i| i.kind() == ModuleKind::PowerGenerator)
        .collect();
    let mut visited: BTreeSet<InstanceId> = BTreeSet::new();

    while let Some(item) = frontier.pop() {
        if !visited.insert(item.id.clone()) {
            continue;
        }
        for n in items_at(&adjacent_cells(item), items) {
            if n.id == item.id || !n.kind().is_target(Network::Power) {
                continue;
            }
            powered.insert(n.id.clone());
            if n.kind().is_conductor(Network::Power) {
                frontier.push(n);
            }
        }
    }
    powered
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Bounds: on an empty layout a footprint is accepted iff it lies inside
    /// the grid.
    #[test]
    fn bounds_check_matches_arithmetic(
        row in -4..24i32,
        col in -4..34i32,
        width in 1..5u32,
        height in 1..5u32,
    ) {
        let dims = GridDimensions::default();
        let fits = row >= 0
            && col >= 0
            && row + height as i32 <= dims.rows as i32
            && col + width as i32 <= dims.cols as i32;
        let origin = GridPosition::new(row, col);
        let footprint = Footprint::new(width, height);

        prop_assert_eq!(in_bounds(origin, footprint, dims), fits);
        prop_assert_eq!(placement::is_valid(origin, footprint, &[], None, dims), fits);
    }

    /// No two placed items ever share a cell, lifted or not, and every item
    /// stays in bounds.
    #[test]
    fn intents_never_produce_overlap(ops in arb_ops(40)) {
        let mut d = Designer::new(small_grid(), sample_palette(), sample_catalog());
        for op in &ops {
            apply(&mut d, op);

            let items = d.items();
            for (i, a) in items.iter().enumerate() {
                let origin = a.position.expect("placed items have a position");
                prop_assert!(in_bounds(origin, a.footprint(), d.dimensions()));
                for b in &items[i + 1..] {
                    prop_assert!(!overlaps(a, b), "{} overlaps {}", a.id, b.id);
                }
            }
        }
    }

    /// Idempotence: a second recompute over a settled layout changes nothing.
    #[test]
    fn recompute_is_idempotent(ops in arb_ops(30)) {
        let mut d = Designer::new(small_grid(), sample_palette(), sample_catalog());
        for op in &ops {
            apply(&mut d, op);
        }
        settle(&mut d);
        let revision = d.revision();
        let summary = d.recompute();
        prop_assert!(summary.changed.is_empty());
        prop_assert_eq!(d.revision(), revision);
    }

    /// Reachability: an item is powered iff it is a generator or it touches a
    /// generator or a conductor reachable from one.
    #[test]
    fn power_matches_reference_flood(ops in arb_ops(40)) {
        let mut d = Designer::new(small_grid(), sample_palette(), sample_catalog());
        for op in &ops {
            apply(&mut d, op);
        }
        settle(&mut d);
        let expected = reference_powered(d.items());
        for item in d.items() {
            let kind = item.kind();
            if kind == ModuleKind::PowerGenerator {
                prop_assert!(item.status.is_powered());
            } else if kind.participates(Network::Power) {
                prop_assert_eq!(
                    item.status.is_powered(),
                    expected.contains(&item.id),
                    "power mismatch for {}", item.id
                );
            }
        }
    }

    /// Without generators no pump is powered, so only wells can water pipes.
    #[test]
    fn unpowered_pumps_never_water(cells in proptest::collection::vec((0..8i32, 0..8i32, any::<bool>()), 1..30)) {
        let mut d = Designer::new(small_grid(), sample_palette(), sample_catalog());
        for (row, col, is_pump) in cells {
            let template = if is_pump { "water-pump" } else { "water-pipe" };
            let _ = d.place(&ModuleId::from(template), row, col);
        }
        for item in d.items() {
            prop_assert!(!item.status.is_powered());
            prop_assert!(!item.status.is_watered(), "{} watered without a source", item.id);
        }
    }

    /// Cooling falls off monotonically and vanishes at the radius.
    #[test]
    fn falloff_is_monotone(capacity in 0..1000i64, a in 0.0..4.0f64, b in 0.0..4.0f64) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(falloff(capacity, near, 3.0) >= falloff(capacity, far, 3.0));
        prop_assert!(falloff(capacity, near, 3.0) <= capacity);
        prop_assert_eq!(falloff(capacity, 3.0, 3.0), 0);
    }
}
