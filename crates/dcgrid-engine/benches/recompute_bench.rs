//! Criterion benchmarks for the full simulation run.

use criterion::{Criterion, criterion_group, criterion_main};
use dcgrid_core::grid::GridDimensions;
use dcgrid_core::id::ModuleId;
use dcgrid_core::test_utils::*;
use dcgrid_engine::{Designer, DesignerConfig};

/// A 40x40 grid striped with generator, wire and rack rows, plus a well and
/// pipe run feeding coolers along the bottom.
fn dense_designer() -> Designer {
    let config = DesignerConfig {
        grid: GridDimensions::new(40, 40),
        ..DesignerConfig::default()
    };
    let mut d = Designer::new(config, sample_palette(), sample_catalog());
    let generator = ModuleId::from("diesel-generator");
    let wire = ModuleId::from("power-wire");
    let rack = ModuleId::from("server-rack");

    for band in 0..10 {
        let row = band * 3;
        d.place(&generator, row, 0).unwrap();
        for col in 1..40 {
            d.place(&wire, row, col).unwrap();
        }
        for col in 0..40 {
            d.place(&rack, row + 1, col).unwrap();
        }
    }

    let well = ModuleId::from("water-well");
    let pipe = ModuleId::from("water-pipe");
    let cooler = ModuleId::from("water-cooler");
    d.place(&well, 32, 0).unwrap();
    for col in 1..40 {
        d.place(&pipe, 32, col).unwrap();
    }
    d.place(&generator, 34, 0).unwrap();
    for col in 1..40 {
        d.place(&wire, 34, col).unwrap();
        if col % 4 == 0 {
            d.place(&cooler, 33, col).unwrap();
        }
    }
    d
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");
    group.sample_size(30);

    let mut d = dense_designer();
    group.bench_function("dense_40x40_steady_state", |b| {
        b.iter(|| d.recompute());
    });

    group.bench_function("place_and_remove_wire", |b| {
        let mut d = dense_designer();
        let wire = ModuleId::from("power-wire");
        b.iter(|| {
            let id = d.place(&wire, 39, 39).unwrap().id;
            d.remove(&id).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_recompute);
criterion_main!(benches);
