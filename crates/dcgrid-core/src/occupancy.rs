//! Cell-to-item index used for neighbour lookup during traversal.

use std::collections::BTreeMap;

use crate::geometry::adjacent_cells;
use crate::grid::GridPosition;
use crate::item::PlacedItem;

/// Maps each occupied cell to the index of the item covering it.
///
/// Indices refer to the slice the index was built from. Items without a
/// position, and items currently being dragged, are not indexed. If two
/// items claim a cell the first one wins.
#[derive(Debug, Default, Clone)]
pub struct Occupancy {
    cells: BTreeMap<GridPosition, usize>,
}

impl Occupancy {
    pub fn build(items: &[PlacedItem]) -> Self {
        let mut cells = BTreeMap::new();
        for (idx, item) in items.iter().enumerate() {
            if item.dragging {
                continue;
            }
            for cell in item.cells() {
                cells.entry(cell).or_insert(idx);
            }
        }
        Self { cells }
    }

    pub fn index_at(&self, cell: GridPosition) -> Option<usize> {
        self.cells.get(&cell).copied()
    }

    /// Indices of items bordering `items[idx]`, in adjacent-ring order,
    /// each reported once.
    pub fn neighbors(&self, items: &[PlacedItem], idx: usize) -> Vec<usize> {
        let Some(item) = items.get(idx) else {
            return Vec::new();
        };
        let mut result = Vec::new();
        for cell in adjacent_cells(item) {
            if let Some(n) = self.index_at(cell) {
                if n != idx && !result.contains(&n) {
                    result.push(n);
                }
            }
        }
        result
    }
}
