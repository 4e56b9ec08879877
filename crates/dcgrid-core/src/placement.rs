//! Placement validation. Rejections are ordinary values, not faults.

use crate::geometry::{footprints_overlap, in_bounds};
use crate::grid::{Footprint, GridDimensions, GridPosition};
use crate::id::{InstanceId, ModuleId};
use crate::item::PlacedItem;

/// Why an intent could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error(
        "{width}x{height} footprint at ({row}, {col}) does not fit a {rows}x{cols} grid"
    )]
    OutOfBounds {
        row: i32,
        col: i32,
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    },
    #[error("overlaps {with}")]
    Overlap { with: InstanceId },
    #[error("unknown template '{0}'")]
    UnknownTemplate(ModuleId),
    #[error("no placed item '{0}'")]
    UnknownInstance(InstanceId),
    #[error("{id} is {width}x{height}; only 1x1 items rotate")]
    NotRotatable {
        id: InstanceId,
        width: u32,
        height: u32,
    },
    #[error("{0} has no position on the grid")]
    NotPlaced(InstanceId),
}

/// Check whether `footprint` can sit at `origin`.
///
/// Items flagged as dragging and the item named by `exclude` (the one being
/// moved) are ignored for the overlap test.
pub fn validate(
    origin: GridPosition,
    footprint: Footprint,
    items: &[PlacedItem],
    exclude: Option<&InstanceId>,
    dims: GridDimensions,
) -> Result<(), PlacementError> {
    check(origin, footprint, items, exclude, dims, false)
}

/// Like [`validate`], but items flagged as dragging still hold their cells.
///
/// A lifted item returns to its old cells when the drag is cancelled or its
/// move is rejected, so nothing else may claim them in the meantime. Only
/// `exclude` is ignored.
pub fn validate_reserved(
    origin: GridPosition,
    footprint: Footprint,
    items: &[PlacedItem],
    exclude: Option<&InstanceId>,
    dims: GridDimensions,
) -> Result<(), PlacementError> {
    check(origin, footprint, items, exclude, dims, true)
}

fn check(
    origin: GridPosition,
    footprint: Footprint,
    items: &[PlacedItem],
    exclude: Option<&InstanceId>,
    dims: GridDimensions,
    dragging_blocks: bool,
) -> Result<(), PlacementError> {
    if !in_bounds(origin, footprint, dims) {
        return Err(PlacementError::OutOfBounds {
            row: origin.row,
            col: origin.col,
            width: footprint.width,
            height: footprint.height,
            rows: dims.rows,
            cols: dims.cols,
        });
    }
    for item in items {
        if (item.dragging && !dragging_blocks) || exclude == Some(&item.id) {
            continue;
        }
        let Some(other) = item.position else {
            continue;
        };
        if footprints_overlap(origin, footprint, other, item.footprint()) {
            return Err(PlacementError::Overlap {
                with: item.id.clone(),
            });
        }
    }
    Ok(())
}

pub fn is_valid(
    origin: GridPosition,
    footprint: Footprint,
    items: &[PlacedItem],
    exclude: Option<&InstanceId>,
    dims: GridDimensions,
) -> bool {
    validate(origin, footprint, items, exclude, dims).is_ok()
}
