//! Grid primitives: cell positions, footprints, rotation, and the overall
//! canvas dimensions.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// A cell on the grid. Row grows downward, column grows rightward.
///
/// Signed so that candidate drops left of or above the canvas can be
/// represented and rejected rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: i32,
    pub col: i32,
}

impl GridPosition {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

// ---------------------------------------------------------------------------
// Footprint
// ---------------------------------------------------------------------------

/// The size of a piece of equipment in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Default for Footprint {
    fn default() -> Self {
        Self::single()
    }
}

impl Footprint {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A 1x1 footprint.
    pub fn single() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }

    /// Whether this is a 1x1 footprint (the only rotatable size).
    pub fn is_single(&self) -> bool {
        self.width == 1 && self.height == 1
    }

    /// Iterate over all cells covered when the top-left corner sits at `origin`.
    pub fn cells(&self, origin: GridPosition) -> impl Iterator<Item = GridPosition> {
        let w = self.width as i32;
        let h = self.height as i32;
        (0..h).flat_map(move |dr| {
            (0..w).map(move |dc| GridPosition::new(origin.row + dr, origin.col + dc))
        })
    }

    /// Whether `cell` lies inside this footprint placed at `origin`.
    pub fn covers(&self, origin: GridPosition, cell: GridPosition) -> bool {
        let (r, c) = (i64::from(cell.row), i64::from(cell.col));
        let (or, oc) = (i64::from(origin.row), i64::from(origin.col));
        r >= or && r < or + i64::from(self.height) && c >= oc && c < oc + i64::from(self.width)
    }

    /// Centre of the footprint at `origin`, as `(row, col)` in cell units.
    pub fn center(&self, origin: GridPosition) -> (f64, f64) {
        (
            f64::from(origin.row) + f64::from(self.height) / 2.0,
            f64::from(origin.col) + f64::from(self.width) / 2.0,
        )
    }
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

/// Display rotation of 1x1 travel components (wires, pipes).
///
/// Purely cosmetic: adjacency is 4-directional regardless of rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Rotate 90 degrees clockwise.
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::None => Rotation::Cw90,
            Rotation::Cw90 => Rotation::Cw180,
            Rotation::Cw180 => Rotation::Cw270,
            Rotation::Cw270 => Rotation::None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

/// Size of the canvas in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    pub rows: u32,
    pub cols: u32,
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            rows: Self::MIN_ROWS,
            cols: Self::MIN_COLS,
        }
    }
}

impl GridDimensions {
    pub const MIN_ROWS: u32 = 20;
    pub const MIN_COLS: u32 = 30;
    /// Extra cells beyond the visible viewport so the canvas always scrolls.
    pub const VIEWPORT_MARGIN: u32 = 5;

    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Size the canvas to cover a viewport of `width_px` x `height_px` with
    /// square cells of `cell_px`, never going below 20 rows x 30 cols.
    pub fn for_viewport(width_px: u32, height_px: u32, cell_px: u32) -> Self {
        let cell = cell_px.max(1);
        let cols = width_px.div_ceil(cell) + Self::VIEWPORT_MARGIN;
        let rows = height_px.div_ceil(cell) + Self::VIEWPORT_MARGIN;
        Self {
            rows: rows.max(Self::MIN_ROWS),
            cols: cols.max(Self::MIN_COLS),
        }
    }

    /// Whether a single cell is on the canvas.
    pub fn contains(&self, cell: GridPosition) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && i64::from(cell.row) < i64::from(self.rows)
            && i64::from(cell.col) < i64::from(self.cols)
    }
}
