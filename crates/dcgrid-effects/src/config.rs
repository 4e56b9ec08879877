//! Tuning constants shared by the effect passes.

use serde::{Deserialize, Serialize};

/// Tuning constants for the derived-effect passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Centre-to-centre reach of an active cooler, in cells. Inclusive.
    pub cooling_radius: f64,
    /// Fraction of the base water draw kept by a consumer on treated water.
    pub treatment_factor: f64,
    /// Capacity multiplier for a cooler running on treated water.
    pub cooler_boost: f64,
    pub transformer_bonus_percent: i64,
    /// Breaker capacity used when the module declares none.
    pub default_breaker_capacity: i64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            cooling_radius: 3.0,
            treatment_factor: 0.85,
            cooler_boost: 1.25,
            transformer_bonus_percent: 15,
            default_breaker_capacity: 400,
        }
    }
}

/// `floor(value * factor)` on integer ratings.
pub(crate) fn scale_floor(value: i64, factor: f64) -> i64 {
    (value as f64 * factor).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: EffectsConfig = toml::from_str("cooling_radius = 4.5").unwrap();
        assert_eq!(cfg.cooling_radius, 4.5);
        assert_eq!(cfg.treatment_factor, 0.85);
        assert_eq!(cfg.default_breaker_capacity, 400);
    }

    #[test]
    fn scale_floor_rounds_down() {
        assert_eq!(scale_floor(100, 0.85), 85);
        assert_eq!(scale_floor(90, 1.25), 112);
        assert_eq!(scale_floor(33, 0.85), 28);
    }
}
