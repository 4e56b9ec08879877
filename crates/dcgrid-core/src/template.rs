//! Equipment templates: the palette entries a user drags onto the grid.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grid::Footprint;
use crate::id::ModuleId;
use crate::module::{DistributorRole, ModuleKind};

/// A draggable palette entry. Placing it copies the template onto the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentTemplate {
    /// Module id; also the key into the metadata catalog.
    pub id: ModuleId,
    pub label: String,
    #[serde(default)]
    pub footprint: Footprint,
    pub kind: ModuleKind,
    #[serde(default)]
    pub role: DistributorRole,
    #[serde(default)]
    pub category: String,
}

/// Errors from template and palette construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template '{id}' has an empty {width}x{height} footprint")]
    EmptyFootprint { id: ModuleId, width: u32, height: u32 },
    #[error("template '{id}' is a {kind} but declares distributor role {role:?}")]
    RoleOnNonDistributor {
        id: ModuleId,
        kind: ModuleKind,
        role: DistributorRole,
    },
    #[error("duplicate template id '{0}'")]
    Duplicate(ModuleId),
}

impl EquipmentTemplate {
    pub fn new(id: &str, label: &str, kind: ModuleKind, footprint: Footprint) -> Self {
        Self {
            id: ModuleId::new(id),
            label: label.to_string(),
            footprint,
            kind,
            role: DistributorRole::Relay,
            category: String::new(),
        }
    }

    pub fn with_role(mut self, role: DistributorRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Check the template is internally consistent.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.footprint.width == 0 || self.footprint.height == 0 {
            return Err(TemplateError::EmptyFootprint {
                id: self.id.clone(),
                width: self.footprint.width,
                height: self.footprint.height,
            });
        }
        if self.role != DistributorRole::Relay && self.kind != ModuleKind::PowerDistributor {
            return Err(TemplateError::RoleOnNonDistributor {
                id: self.id.clone(),
                kind: self.kind,
                role: self.role,
            });
        }
        Ok(())
    }

    pub fn is_circuit_breaker(&self) -> bool {
        self.kind == ModuleKind::PowerDistributor && self.role == DistributorRole::CircuitBreaker
    }

    pub fn is_transformer(&self) -> bool {
        self.kind == ModuleKind::PowerDistributor && self.role == DistributorRole::Transformer
    }
}

/// The ordered list of templates offered to the user.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    templates: Vec<EquipmentTemplate>,
    index: HashMap<ModuleId, usize>,
}

impl Palette {
    /// Build a palette, validating each template and rejecting duplicate ids.
    pub fn new(templates: Vec<EquipmentTemplate>) -> Result<Self, TemplateError> {
        let mut index = HashMap::with_capacity(templates.len());
        for (i, template) in templates.iter().enumerate() {
            template.validate()?;
            if index.insert(template.id.clone(), i).is_some() {
                return Err(TemplateError::Duplicate(template.id.clone()));
            }
        }
        Ok(Self { templates, index })
    }

    pub fn get(&self, id: &ModuleId) -> Option<&EquipmentTemplate> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquipmentTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
