use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies a module type in the metadata catalog (e.g. `"server-rack"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifies one placed piece of equipment.
///
/// Built from the module id plus the placement sequence number, so two drops
/// of the same template never share an id. Renders as `"<module>-<seq>"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId {
    module: ModuleId,
    seq: u64,
}

impl InstanceId {
    pub fn new(module: ModuleId, seq: u64) -> Self {
        Self { module, seq }
    }

    /// The module type this instance was created from.
    pub fn module(&self) -> &ModuleId {
        &self.module
    }

    /// The placement sequence number.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.module, self.seq)
    }
}

/// Error returned when a string is not of the form `"<module>-<seq>"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not an instance id (expected <module>-<seq>)")]
pub struct ParseInstanceIdError(pub String);

impl FromStr for InstanceId {
    type Err = ParseInstanceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, seq) = s
            .rsplit_once('-')
            .ok_or_else(|| ParseInstanceIdError(s.to_string()))?;
        if module.is_empty() {
            return Err(ParseInstanceIdError(s.to_string()));
        }
        let seq = seq
            .parse::<u64>()
            .map_err(|_| ParseInstanceIdError(s.to_string()))?;
        Ok(Self::new(ModuleId::new(module), seq))
    }
}
