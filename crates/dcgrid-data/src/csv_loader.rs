//! Module metadata table (`modules.csv`).
//!
//! One row per module type, keyed by the `id` column. Numeric columns read
//! as integers: blank cells are zero, and a cell with a numeric prefix keeps
//! the prefix (`"12.5"` reads as 12). Cells with no digits at all read as zero
//! and are logged. Unknown columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use dcgrid_core::id::ModuleId;
use dcgrid_core::module::{ModuleCatalog, ModuleSpec};

use crate::loader::DataLoadError;

/// Parse a leading base-10 integer, ignoring anything after it.
///
/// Returns `None` when `s` has no leading digits.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn numeric_cell(id: &str, column: &str, value: &str) -> i64 {
    if value.is_empty() {
        return 0;
    }
    match parse_int_prefix(value) {
        Some(n) => n,
        None => {
            tracing::warn!(
                target: "dcgrid::data",
                module = id,
                column,
                value,
                "modules.field.unparsable"
            );
            0
        }
    }
}

/// Assign one cell to the matching field of `spec`. Returns false for
/// columns the catalog does not know.
fn assign(spec: &mut ModuleSpec, column: &str, value: &str) -> bool {
    let id = spec.id.0.clone();
    let slot = match column {
        "id" => {
            spec.id = ModuleId::new(value);
            return true;
        }
        "name" => {
            spec.name = value.to_string();
            return true;
        }
        "type" | "category" => {
            spec.category = value.to_string();
            return true;
        }
        "description" => {
            spec.description = value.to_string();
            return true;
        }
        "power_consumption" => &mut spec.power_consumption,
        "power_generation" => &mut spec.power_generation,
        "water_consumption" => &mut spec.water_consumption,
        "water_generation" => &mut spec.water_generation,
        "heat_generation" => &mut spec.heat_generation,
        "cooling_capacity" => &mut spec.cooling_capacity,
        "storage_capacity" => &mut spec.storage_capacity,
        "processing_power" => &mut spec.processing_power,
        "efficiency" => &mut spec.efficiency,
        "uptime" => &mut spec.uptime,
        "flow_rate" => &mut spec.flow_rate,
        "max_capacity" => &mut spec.max_capacity,
        "required_water_level" => &mut spec.required_water_level,
        _ => return false,
    };
    *slot = numeric_cell(&id, column, value);
    true
}

/// Parse a metadata table from any reader. `file` is only used in errors.
pub fn parse_catalog<R: Read>(reader: R, file: &Path) -> Result<ModuleCatalog, DataLoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| DataLoadError::Csv {
            file: file.to_path_buf(),
            detail: e.to_string(),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    // Read `id` first so field warnings can name the module.
    let id_col = headers.iter().position(|h| h == "id");
    let mut catalog = ModuleCatalog::new();

    for (row, record) in rdr.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(
                    target: "dcgrid::data",
                    row = row + 2,
                    error = %e,
                    "modules.row.unreadable"
                );
                continue;
            }
        };
        if record.iter().all(str::is_empty) {
            continue;
        }

        let id = id_col.and_then(|c| record.get(c)).unwrap_or("");
        if id.is_empty() {
            tracing::warn!(target: "dcgrid::data", row = row + 2, "modules.row.missing_id");
            continue;
        }

        let mut spec = ModuleSpec::named(id);
        spec.name.clear();
        for (column, value) in headers.iter().zip(record.iter()) {
            assign(&mut spec, column, value);
        }
        if spec.name.is_empty() {
            spec.name = spec.id.0.clone();
        }
        catalog.insert(spec);
    }

    if catalog.is_empty() {
        tracing::warn!(target: "dcgrid::data", file = %file.display(), "modules.empty");
    } else {
        tracing::debug!(
            target: "dcgrid::data",
            file = %file.display(),
            modules = catalog.len(),
            "modules.loaded"
        );
    }
    Ok(catalog)
}

/// Read the metadata table at `path`.
pub fn load_catalog(path: &Path) -> Result<ModuleCatalog, DataLoadError> {
    let file = File::open(path)?;
    parse_catalog(file, path)
}

/// Read the metadata table at `path`, falling back to an empty catalog.
///
/// Placement keeps working without metadata; every rating reads as zero.
pub fn load_catalog_lossy(path: &Path) -> ModuleCatalog {
    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(
                target: "dcgrid::data",
                file = %path.display(),
                error = %e,
                "modules.load_failed"
            );
            ModuleCatalog::new()
        }
    }
}
