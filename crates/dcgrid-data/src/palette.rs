//! Equipment palettes: the built-in set and palettes read from data files.
//!
//! Palette files list templates under a `template` key in TOML, or as a bare
//! list in JSON:
//!
//! ```toml
//! [[template]]
//! id = "server-rack"
//! label = "Server Rack"
//! kind = "power-consumer"
//! footprint = { width = 1, height = 2 }
//! category = "compute"
//! ```

use std::path::Path;

use dcgrid_core::grid::Footprint;
use dcgrid_core::module::{DistributorRole, ModuleKind};
use dcgrid_core::template::{EquipmentTemplate, Palette, TemplateError};

use crate::loader::{DataLoadError, deserialize_list};

fn template(
    id: &str,
    label: &str,
    kind: ModuleKind,
    (width, height): (u32, u32),
    category: &str,
) -> EquipmentTemplate {
    EquipmentTemplate::new(id, label, kind, Footprint::new(width, height)).with_category(category)
}

/// Templates shipped with the designer, in panel order.
pub fn builtin_templates() -> Vec<EquipmentTemplate> {
    use ModuleKind::*;
    vec![
        template("diesel-generator", "Diesel Generator", PowerGenerator, (2, 2), "power"),
        template("solar-panel", "Solar Panel", PowerGenerator, (1, 1), "power"),
        template("power-supply", "Power Supply", PowerGenerator, (1, 1), "power"),
        template("power-wire", "Power Wire", PowerWire, (1, 1), "power"),
        template("circuit-breaker", "Circuit Breaker", PowerDistributor, (1, 1), "power")
            .with_role(DistributorRole::CircuitBreaker),
        template("hackupc-transformer", "Transformer", PowerDistributor, (1, 1), "power")
            .with_role(DistributorRole::Transformer),
        template("server-rack", "Server Rack", PowerConsumer, (1, 2), "compute"),
        template("network-rack", "Network Rack", PowerConsumer, (1, 2), "compute"),
        template("network-switch", "Network Switch", PowerConsumer, (2, 1), "compute"),
        template("storage-array", "Storage Array", PowerConsumer, (3, 2), "compute"),
        template("water-well", "Water Well", WaterSource, (1, 1), "water"),
        template("water-pump", "Water Pump", WaterSourcePowered, (1, 1), "water"),
        template("water-pipe", "Water Pipe", WaterPipe, (1, 1), "water"),
        template("water-treatment-plant", "Water Treatment Plant", WaterProcessor, (2, 2), "water"),
        template("water-cooler", "Water Cooler", CoolingSystem, (2, 2), "cooling"),
        template("cooling-unit", "Cooling Unit", CoolingSystem, (2, 2), "cooling"),
    ]
}

/// The built-in palette.
pub fn builtin_palette() -> Result<Palette, TemplateError> {
    Palette::new(builtin_templates())
}

/// Read a palette file. The format follows the extension.
pub fn load_palette(path: &Path) -> Result<Palette, DataLoadError> {
    let templates: Vec<EquipmentTemplate> = deserialize_list(path, "template")?;
    let count = templates.len();
    let palette = Palette::new(templates).map_err(|source| {
        tracing::warn!(
            target: "dcgrid::data",
            file = %path.display(),
            error = %source,
            "palette.template.rejected"
        );
        DataLoadError::InvalidTemplate {
            file: path.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(
        target: "dcgrid::data",
        file = %path.display(),
        templates = count,
        "palette.loaded"
    );
    Ok(palette)
}
