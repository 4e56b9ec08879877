//! Pure rectangle arithmetic over grid cells.
//!
//! Nothing here mutates state. Items without a position never overlap,
//! border, or sit at any finite distance from anything.

use crate::grid::{Footprint, GridDimensions, GridPosition};
use crate::item::PlacedItem;

/// Whether a footprint at `origin` lies entirely on the canvas.
///
/// Checked on the top-left and bottom-right cells; an empty footprint never
/// fits.
pub fn in_bounds(origin: GridPosition, footprint: Footprint, dims: GridDimensions) -> bool {
    if footprint.width == 0 || footprint.height == 0 {
        return false;
    }
    let far_row = i64::from(origin.row) + i64::from(footprint.height) - 1;
    let far_col = i64::from(origin.col) + i64::from(footprint.width) - 1;
    match (i32::try_from(far_row), i32::try_from(far_col)) {
        (Ok(row), Ok(col)) => {
            dims.contains(origin) && dims.contains(GridPosition::new(row, col))
        }
        _ => false,
    }
}

/// Axis-aligned intersection of two placed rectangles.
pub fn footprints_overlap(
    a_origin: GridPosition,
    a: Footprint,
    b_origin: GridPosition,
    b: Footprint,
) -> bool {
    let (ar, ac) = (i64::from(a_origin.row), i64::from(a_origin.col));
    let (br, bc) = (i64::from(b_origin.row), i64::from(b_origin.col));
    ac < bc + i64::from(b.width)
        && ac + i64::from(a.width) > bc
        && ar < br + i64::from(b.height)
        && ar + i64::from(a.height) > br
}

/// Whether two items overlap. False if either lacks a position.
pub fn overlaps(a: &PlacedItem, b: &PlacedItem) -> bool {
    match (a.position, b.position) {
        (Some(pa), Some(pb)) => footprints_overlap(pa, a.footprint(), pb, b.footprint()),
        _ => false,
    }
}

/// The ring of cells bordering an item's footprint on its four sides.
///
/// Ordered right edge, left edge, below, above; each edge is walked along
/// its length. Cells with a negative row or column are skipped. Corners are
/// never included.
pub fn adjacent_cells(item: &PlacedItem) -> Vec<GridPosition> {
    let Some(origin) = item.position else {
        return Vec::new();
    };
    let fp = item.footprint();
    let (w, h) = (fp.width as i32, fp.height as i32);
    let mut cells = Vec::with_capacity(2 * (fp.width + fp.height) as usize);

    for dr in 0..h {
        cells.push(GridPosition::new(origin.row + dr, origin.col + w));
    }
    if origin.col > 0 {
        for dr in 0..h {
            cells.push(GridPosition::new(origin.row + dr, origin.col - 1));
        }
    }
    for dc in 0..w {
        cells.push(GridPosition::new(origin.row + h, origin.col + dc));
    }
    if origin.row > 0 {
        for dc in 0..w {
            cells.push(GridPosition::new(origin.row - 1, origin.col + dc));
        }
    }
    cells
}

/// Items whose footprint covers any of `cells`, each once, in first-hit order.
pub fn items_at<'a>(cells: &[GridPosition], items: &'a [PlacedItem]) -> Vec<&'a PlacedItem> {
    let mut found: Vec<&PlacedItem> = Vec::new();
    for &cell in cells {
        for item in items {
            if item.contains_cell(cell) && !found.iter().any(|f| f.id == item.id) {
                found.push(item);
            }
        }
    }
    found
}

/// Euclidean distance between footprint centres, infinite if either item
/// is unpositioned.
pub fn distance(a: &PlacedItem, b: &PlacedItem) -> f64 {
    match (a.center(), b.center()) {
        (Some((ar, ac)), Some((br, bc))) => ((ar - br).powi(2) + (ac - bc).powi(2)).sqrt(),
        _ => f64::INFINITY,
    }
}
