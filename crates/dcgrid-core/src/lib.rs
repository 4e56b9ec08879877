//! dcgrid core -- the data model of the data centre layout simulator.
//!
//! Holds everything the other crates share: identifiers, module metadata and
//! kinds, palette templates, grid primitives, the placed-item collection and
//! its per-item status, rectangle geometry, the occupancy index, placement
//! validation, and layout events.
//!
//! # Key Types
//!
//! - [`module::ModuleKind`] -- closed set of module behaviours; network roles
//!   are answered by the kind, never by the id string.
//! - [`module::ModuleCatalog`] -- static ratings per module id.
//! - [`template::Palette`] -- the templates a user can place.
//! - [`item::PlacedItem`] -- one piece of equipment on the grid.
//! - [`status::ItemStatus`] -- everything a simulation run derives for an item.
//! - [`placement::validate`] -- bounds and overlap check for a candidate drop.

pub mod event;
pub mod geometry;
pub mod grid;
pub mod id;
pub mod item;
pub mod module;
pub mod occupancy;
pub mod placement;
pub mod status;
pub mod template;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use grid::{Footprint, GridDimensions, GridPosition, Rotation};
pub use id::{InstanceId, ModuleId};
pub use item::PlacedItem;
pub use module::{DistributorRole, ModuleCatalog, ModuleKind, ModuleSpec, Network};
pub use placement::PlacementError;
pub use status::ItemStatus;
pub use template::{EquipmentTemplate, Palette};
