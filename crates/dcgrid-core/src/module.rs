//! Static module metadata and the closed set of module kinds.
//!
//! A [`ModuleSpec`] holds the numeric ratings of one module type, loaded once
//! at startup. A [`ModuleKind`] decides which propagation and derived-effect
//! rules apply to a placed item; network roles are answered by the kind
//! itself, never by inspecting identifier strings.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::ModuleId;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// The two resource networks a layout carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Power,
    Water,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Power => f.write_str("power"),
            Network::Water => f.write_str("water"),
        }
    }
}

// ---------------------------------------------------------------------------
// Module kinds
// ---------------------------------------------------------------------------

/// What a module does on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    PowerGenerator,
    PowerWire,
    PowerConsumer,
    PowerDistributor,
    WaterSource,
    /// A water source that only produces while it is itself powered.
    #[serde(rename = "water-source-power", alias = "water-source-requiring-power")]
    WaterSourcePowered,
    WaterPipe,
    WaterProcessor,
    CoolingSystem,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 9] = [
        ModuleKind::PowerGenerator,
        ModuleKind::PowerWire,
        ModuleKind::PowerConsumer,
        ModuleKind::PowerDistributor,
        ModuleKind::WaterSource,
        ModuleKind::WaterSourcePowered,
        ModuleKind::WaterPipe,
        ModuleKind::WaterProcessor,
        ModuleKind::CoolingSystem,
    ];

    /// The kebab-case name used in data files.
    pub fn name(self) -> &'static str {
        match self {
            ModuleKind::PowerGenerator => "power-generator",
            ModuleKind::PowerWire => "power-wire",
            ModuleKind::PowerConsumer => "power-consumer",
            ModuleKind::PowerDistributor => "power-distributor",
            ModuleKind::WaterSource => "water-source",
            ModuleKind::WaterSourcePowered => "water-source-power",
            ModuleKind::WaterPipe => "water-pipe",
            ModuleKind::WaterProcessor => "water-processor",
            ModuleKind::CoolingSystem => "cooling-system",
        }
    }

    /// Whether this kind originates `network`.
    ///
    /// A powered water source is a water source only while powered; the
    /// tracer checks that condition separately.
    pub fn is_source(self, network: Network) -> bool {
        match network {
            Network::Power => self == ModuleKind::PowerGenerator,
            Network::Water => matches!(
                self,
                ModuleKind::WaterSource | ModuleKind::WaterSourcePowered
            ),
        }
    }

    /// Whether this kind passes `network` on to its neighbours.
    pub fn is_conductor(self, network: Network) -> bool {
        match network {
            Network::Power => matches!(
                self,
                ModuleKind::PowerWire | ModuleKind::PowerDistributor
            ),
            Network::Water => self == ModuleKind::WaterPipe,
        }
    }

    /// Whether a trace over `network` may mark this kind as energized.
    pub fn is_target(self, network: Network) -> bool {
        self.is_conductor(network) || self.is_endpoint(network)
    }

    /// Whether this kind draws from `network` without passing it on.
    pub fn is_endpoint(self, network: Network) -> bool {
        match network {
            Network::Power => matches!(
                self,
                ModuleKind::PowerConsumer
                    | ModuleKind::WaterProcessor
                    | ModuleKind::CoolingSystem
                    | ModuleKind::WaterSourcePowered
            ),
            Network::Water => matches!(
                self,
                ModuleKind::PowerConsumer
                    | ModuleKind::WaterProcessor
                    | ModuleKind::CoolingSystem
            ),
        }
    }

    /// Whether this kind takes part in `network` at all, as source or target.
    pub fn participates(self, network: Network) -> bool {
        self.is_source(network) || self.is_target(network)
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown module kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown module kind '{0}'")]
pub struct UnknownModuleKind(pub String);

impl FromStr for ModuleKind {
    type Err = UnknownModuleKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "water-source-requiring-power" {
            return Ok(ModuleKind::WaterSourcePowered);
        }
        ModuleKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnknownModuleKind(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Distributor roles
// ---------------------------------------------------------------------------

/// Special behaviour of a power distributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistributorRole {
    /// Passes power through with no side effects.
    #[default]
    Relay,
    /// Protects connected consumers unless their combined load exceeds its
    /// capacity.
    CircuitBreaker,
    /// Grants connected consumers a power efficiency bonus.
    Transformer,
}

// ---------------------------------------------------------------------------
// Module spec
// ---------------------------------------------------------------------------

/// Numeric ratings and descriptive text of one module type.
///
/// Unknown or blank ratings read as zero. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSpec {
    pub id: ModuleId,
    pub name: String,
    /// Free-form category from the metadata table. Descriptive only.
    pub category: String,
    pub description: String,
    pub power_consumption: i64,
    pub power_generation: i64,
    pub water_consumption: i64,
    pub water_generation: i64,
    pub heat_generation: i64,
    pub cooling_capacity: i64,
    pub storage_capacity: i64,
    pub processing_power: i64,
    pub efficiency: i64,
    pub uptime: i64,
    pub flow_rate: i64,
    pub max_capacity: i64,
    /// Water draw below which a powered module overheats unless cooled.
    pub required_water_level: i64,
}

static EMPTY_SPEC: ModuleSpec = ModuleSpec::EMPTY;

impl ModuleSpec {
    /// A spec with every rating at zero.
    pub const EMPTY: ModuleSpec = ModuleSpec {
        id: ModuleId(String::new()),
        name: String::new(),
        category: String::new(),
        description: String::new(),
        power_consumption: 0,
        power_generation: 0,
        water_consumption: 0,
        water_generation: 0,
        heat_generation: 0,
        cooling_capacity: 0,
        storage_capacity: 0,
        processing_power: 0,
        efficiency: 0,
        uptime: 0,
        flow_rate: 0,
        max_capacity: 0,
        required_water_level: 0,
    };

    /// A zero-rated spec carrying only an id and display name.
    pub fn named(id: &str) -> Self {
        Self {
            id: ModuleId::new(id),
            name: id.to_string(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Lookup of module specs by id.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    specs: HashMap<ModuleId, ModuleSpec>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a spec, replacing any previous spec with the same id.
    pub fn insert(&mut self, spec: ModuleSpec) -> Option<ModuleSpec> {
        self.specs.insert(spec.id.clone(), spec)
    }

    pub fn get(&self, id: &ModuleId) -> Option<&ModuleSpec> {
        self.specs.get(id)
    }

    /// The spec for `id`, or an all-zero spec when the catalog has none.
    ///
    /// Missing metadata never blocks placement; its effects read as zero.
    pub fn spec(&self, id: &ModuleId) -> &ModuleSpec {
        self.specs.get(id).unwrap_or(&EMPTY_SPEC)
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.specs.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleSpec> {
        self.specs.values()
    }
}

impl FromIterator<ModuleSpec> for ModuleCatalog {
    fn from_iter<I: IntoIterator<Item = ModuleSpec>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for spec in iter {
            catalog.insert(spec);
        }
        catalog
    }
}
