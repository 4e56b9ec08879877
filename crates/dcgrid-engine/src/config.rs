//! Designer configuration: canvas size plus effect tuning.

use serde::{Deserialize, Serialize};

use dcgrid_core::grid::GridDimensions;
use dcgrid_effects::EffectsConfig;

/// Designer settings. Every field has a default, so config files only need
/// to name what they change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    pub grid: GridDimensions,
    pub effects: EffectsConfig,
}
