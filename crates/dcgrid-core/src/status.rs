//! Per-item simulation status.
//!
//! Every field is recomputed on each simulation run. Capabilities that carry
//! numbers are modelled as variants or options, so "inactive" is always an
//! explicit state rather than a missing value.

use serde::{Deserialize, Serialize};

use crate::module::Network;

/// Water treatment state of a water processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Treatment {
    #[default]
    Idle,
    Processing,
}

/// A consumer served by an active treatment plant draws less water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Optimization {
    /// Reduced water draw replacing the module's base consumption.
    pub water_consumption: i64,
}

/// Operating state of a cooling system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoolerState {
    #[default]
    Inactive,
    /// Powered and watered, cooling at base capacity.
    Active { capacity: i64 },
    /// Active and fed treated water; capacity includes the enhancement.
    Enhanced { base: i64, capacity: i64 },
}

impl CoolerState {
    pub fn is_active(&self) -> bool {
        !matches!(self, CoolerState::Inactive)
    }

    /// Capacity the cooler radiates, zero while inactive.
    pub fn effective_capacity(&self) -> i64 {
        match *self {
            CoolerState::Inactive => 0,
            CoolerState::Active { capacity } | CoolerState::Enhanced { capacity, .. } => capacity,
        }
    }

    pub fn enhanced_capacity(&self) -> Option<i64> {
        match *self {
            CoolerState::Enhanced { capacity, .. } => Some(capacity),
            _ => None,
        }
    }
}

/// Cooling delivered to a heat-generating item by a nearby cooler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooled {
    pub received: i64,
    /// Heat generation after subtracting the received cooling, floored at 0.
    pub reduced_heat: i64,
}

/// Load measured by a circuit breaker across its connected consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakerLoad {
    pub load: i64,
    pub max_capacity: i64,
    pub overloaded: bool,
}

/// Power efficiency bonus granted by a transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfficiencyBoost {
    pub bonus_percent: i64,
}

impl EfficiencyBoost {
    /// Watts saved on a base draw of `consumption`, rounded down.
    pub fn reduction(&self, consumption: i64) -> i64 {
        (consumption * self.bonus_percent).div_euclid(100)
    }
}

/// Everything the simulation derives for one placed item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemStatus {
    pub power: bool,
    pub water: bool,
    pub treatment: Treatment,
    pub optimization: Option<Optimization>,
    pub cooling: CoolerState,
    pub cooled: Option<Cooled>,
    pub breaker: Option<BreakerLoad>,
    pub protected: bool,
    pub boost: Option<EfficiencyBoost>,
    pub overheating: bool,
}

impl ItemStatus {
    pub fn is_powered(&self) -> bool {
        self.power
    }

    pub fn is_watered(&self) -> bool {
        self.water
    }

    pub fn is_processing(&self) -> bool {
        self.treatment == Treatment::Processing
    }

    pub fn is_optimized(&self) -> bool {
        self.optimization.is_some()
    }

    /// Whether this item is an active cooler.
    pub fn is_active(&self) -> bool {
        self.cooling.is_active()
    }

    pub fn is_cooled(&self) -> bool {
        self.cooled.is_some()
    }

    pub fn is_overheating(&self) -> bool {
        self.overheating
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn is_efficiency_boosted(&self) -> bool {
        self.boost.is_some()
    }

    pub fn is_overloaded(&self) -> bool {
        self.breaker.is_some_and(|b| b.overloaded)
    }

    pub fn optimized_water_consumption(&self) -> Option<i64> {
        self.optimization.map(|o| o.water_consumption)
    }

    pub fn cooling_received(&self) -> Option<i64> {
        self.cooled.map(|c| c.received)
    }

    pub fn reduced_heat_generation(&self) -> Option<i64> {
        self.cooled.map(|c| c.reduced_heat)
    }

    pub fn enhanced_cooling_capacity(&self) -> Option<i64> {
        self.cooling.enhanced_capacity()
    }

    pub fn current_load(&self) -> Option<i64> {
        self.breaker.map(|b| b.load)
    }

    pub fn power_efficiency_bonus(&self) -> Option<i64> {
        self.boost.map(|b| b.bonus_percent)
    }

    /// Whether `network`'s connectivity flag is set.
    pub fn carries(&self, network: Network) -> bool {
        match network {
            Network::Power => self.power,
            Network::Water => self.water,
        }
    }

    pub fn set_carries(&mut self, network: Network, value: bool) {
        match network {
            Network::Power => self.power = value,
            Network::Water => self.water = value,
        }
    }
}
