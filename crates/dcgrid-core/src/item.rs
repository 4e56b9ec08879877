//! Placed equipment instances and their per-item state.

use serde::{Deserialize, Serialize};

use crate::grid::{Footprint, GridPosition, Rotation};
use crate::id::{InstanceId, ModuleId};
use crate::module::ModuleKind;
use crate::status::ItemStatus;
use crate::template::EquipmentTemplate;

/// One piece of equipment on (or being dragged onto) the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub id: InstanceId,
    pub template: EquipmentTemplate,
    /// Top-left cell. `None` while the item is still in flight from the palette.
    pub position: Option<GridPosition>,
    pub rotation: Rotation,
    /// Set while a placed item is being moved. Lifted items skip the
    /// simulation but still hold their cells against other drops.
    pub dragging: bool,
    pub status: ItemStatus,
}

impl PlacedItem {
    /// A fresh, unpositioned copy of `template`.
    pub fn new(id: InstanceId, template: EquipmentTemplate) -> Self {
        Self {
            id,
            template,
            position: None,
            rotation: Rotation::None,
            dragging: false,
            status: ItemStatus::default(),
        }
    }

    /// Builder-style setter for the position.
    pub fn at(mut self, position: GridPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn kind(&self) -> ModuleKind {
        self.template.kind
    }

    pub fn footprint(&self) -> Footprint {
        self.template.footprint
    }

    pub fn module_id(&self) -> &ModuleId {
        &self.template.id
    }

    /// All cells covered by the item, empty when unpositioned.
    pub fn cells(&self) -> Vec<GridPosition> {
        match self.position {
            Some(origin) => self.footprint().cells(origin).collect(),
            None => Vec::new(),
        }
    }

    pub fn contains_cell(&self, cell: GridPosition) -> bool {
        self.position
            .is_some_and(|origin| self.footprint().covers(origin, cell))
    }

    /// Footprint centre in cell units, if positioned.
    pub fn center(&self) -> Option<(f64, f64)> {
        self.position.map(|origin| self.footprint().center(origin))
    }
}
