//! End-to-end layout scenarios driven through the designer.
//!
//! Each test places equipment the way a user would and checks the derived
//! statuses after the automatic recompute.

use dcgrid_core::id::{InstanceId, ModuleId};
use dcgrid_core::module::{ModuleCatalog, ModuleSpec};
use dcgrid_core::placement::PlacementError;
use dcgrid_core::status::CoolerState;
use dcgrid_core::test_utils::*;
use dcgrid_effects::cooling::falloff;
use dcgrid_engine::{Designer, DesignerConfig};

fn designer_with(catalog: ModuleCatalog) -> Designer {
    Designer::new(DesignerConfig::default(), sample_palette(), catalog)
}

fn designer() -> Designer {
    designer_with(sample_catalog())
}

fn place(d: &mut Designer, template: &str, row: i32, col: i32) -> InstanceId {
    d.place(&ModuleId::from(template), row, col)
        .unwrap_or_else(|e| panic!("placing {template} at ({row}, {col}): {e}"))
        .id
}

// ===========================================================================
// Power
// ===========================================================================

#[test]
fn generator_wire_consumer_line() {
    let mut d = designer();
    place(&mut d, "diesel-generator", 0, 0);
    let wire = place(&mut d, "power-wire", 0, 1);
    let switch = place(&mut d, "network-switch", 0, 2);

    assert!(d.item(&wire).unwrap().status.is_powered());
    assert!(d.item(&switch).unwrap().status.is_powered());

    d.remove(&wire).unwrap();
    assert!(!d.item(&switch).unwrap().status.is_powered());
}

#[test]
fn power_reaches_around_corners_through_distributors() {
    let mut d = designer();
    place(&mut d, "diesel-generator", 0, 0);
    place(&mut d, "power-wire", 0, 1);
    place(&mut d, "power-wire", 1, 1);
    let breaker = place(&mut d, "circuit-breaker", 2, 1);
    place(&mut d, "power-wire", 2, 2);
    let rack = place(&mut d, "server-rack", 1, 3);

    assert!(d.item(&breaker).unwrap().status.is_powered());
    assert!(d.item(&rack).unwrap().status.is_powered());
}

#[test]
fn consumers_do_not_relay_power() {
    let mut d = designer();
    place(&mut d, "diesel-generator", 0, 0);
    let first = place(&mut d, "network-switch", 0, 1);
    let second = place(&mut d, "network-switch", 0, 2);

    assert!(d.item(&first).unwrap().status.is_powered());
    assert!(!d.item(&second).unwrap().status.is_powered());
}

// ===========================================================================
// Water
// ===========================================================================

#[test]
fn pump_waters_pipes_only_once_powered() {
    let mut d = designer();
    let pump = place(&mut d, "water-pump", 0, 0);
    let pipe = place(&mut d, "water-pipe", 0, 1);
    assert!(!d.item(&pump).unwrap().status.is_powered());
    assert!(!d.item(&pipe).unwrap().status.is_watered());

    let generator = place(&mut d, "diesel-generator", 1, 0);
    assert!(d.item(&pump).unwrap().status.is_powered());
    assert!(d.item(&pipe).unwrap().status.is_watered());

    d.remove(&generator).unwrap();
    assert!(!d.item(&pipe).unwrap().status.is_watered());
}

#[test]
fn treatment_plant_optimizes_connected_rack() {
    let mut d = designer();
    place(&mut d, "diesel-generator", 0, 0);
    let plant = place(&mut d, "water-treatment-plant", 0, 1);
    place(&mut d, "water-well", 2, 1);
    place(&mut d, "water-pipe", 2, 2);
    let rack = place(&mut d, "server-rack", 2, 3);
    // Second generator under the rack so its draw shows in the stats.
    place(&mut d, "diesel-generator", 4, 3);

    let plant = d.item(&plant).unwrap();
    assert!(plant.status.is_powered());
    assert!(plant.status.is_watered());
    assert!(plant.status.is_processing());

    let rack = d.item(&rack).unwrap();
    assert!(rack.status.is_watered());
    assert_eq!(rack.status.optimized_water_consumption(), Some(85));

    let stats = d.aggregate_stats();
    assert_eq!(stats.water_savings, 15);
}

// ===========================================================================
// Placement
// ===========================================================================

#[test]
fn two_by_two_overlap_rejected_then_accepted_clear_of_block() {
    let mut d = designer();
    for (row, col) in [(6, 6), (6, 7), (7, 6), (7, 7)] {
        place(&mut d, "power-wire", row, col);
    }
    let plant = ModuleId::from("water-treatment-plant");

    let err = d.place(&plant, 5, 5).unwrap_err();
    assert!(matches!(err, PlacementError::Overlap { .. }));
    assert!(d.place(&plant, 8, 8).is_ok());
    assert_eq!(d.items().len(), 5);
}

#[test]
fn out_of_bounds_drop_rejected() {
    let mut d = designer();
    let rack = ModuleId::from("server-rack");
    // 1 wide, 2 tall on the default 20x30 grid.
    assert!(matches!(
        d.place(&rack, 19, 0),
        Err(PlacementError::OutOfBounds { .. })
    ));
    assert!(d.place(&rack, 18, 29).is_ok());
    assert!(d.place(&rack, -1, 0).is_err());
}

// ===========================================================================
// Effects
// ===========================================================================

fn catalog_with_switch_load(load: i64) -> ModuleCatalog {
    let mut catalog = sample_catalog();
    catalog.insert(ModuleSpec {
        power_consumption: load,
        ..spec("network-switch")
    });
    catalog
}

#[test]
fn breaker_load_at_capacity_protects() {
    let mut d = designer_with(catalog_with_switch_load(400));
    place(&mut d, "diesel-generator", 0, 0);
    let breaker = place(&mut d, "circuit-breaker", 0, 1);
    let switch = place(&mut d, "network-switch", 0, 2);

    let load = d.item(&breaker).unwrap().status.breaker.unwrap();
    assert_eq!((load.load, load.max_capacity, load.overloaded), (400, 400, false));
    assert!(d.item(&switch).unwrap().status.is_protected());
    assert_eq!(d.aggregate_stats().protected_components, 1);
}

#[test]
fn breaker_load_over_capacity_overloads() {
    let mut d = designer_with(catalog_with_switch_load(401));
    place(&mut d, "diesel-generator", 0, 0);
    let breaker = place(&mut d, "circuit-breaker", 0, 1);
    let switch = place(&mut d, "network-switch", 0, 2);

    assert!(d.item(&breaker).unwrap().status.is_overloaded());
    assert!(!d.item(&switch).unwrap().status.is_protected());
}

#[test]
fn transformer_boosts_downstream_consumers() {
    let mut d = designer();
    place(&mut d, "diesel-generator", 0, 0);
    place(&mut d, "hackupc-transformer", 0, 1);
    let rack = place(&mut d, "server-rack", 0, 2);

    let status = &d.item(&rack).unwrap().status;
    assert!(status.is_efficiency_boosted());
    assert_eq!(status.power_efficiency_bonus(), Some(15));
    assert_eq!(d.aggregate_stats().power_savings, 15);
}

#[test]
fn cooler_falloff_reaches_nearby_rack() {
    let mut d = designer();
    place(&mut d, "diesel-generator", 0, 0);
    let cooler = place(&mut d, "water-cooler", 0, 1);
    place(&mut d, "water-well", 1, 1);
    let rack = place(&mut d, "server-rack", 0, 3);

    assert_eq!(
        d.item(&cooler).unwrap().status.cooling,
        CoolerState::Active { capacity: 90 }
    );
    let received = falloff(90, 4.25_f64.sqrt(), 3.0);
    assert_eq!(received, 28);

    let status = &d.item(&rack).unwrap().status;
    assert_eq!(status.cooling_received(), Some(28));
    assert_eq!(status.reduced_heat_generation(), Some(22));

    // Moving the rack out of range drops the cooling.
    d.begin_drag(&rack).unwrap();
    d.move_item(&rack, 10, 10).unwrap();
    assert!(!d.item(&rack).unwrap().status.is_cooled());
}
