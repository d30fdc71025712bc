//! Wave layouts and neighbor arithmetic
//!
//! Maps flat cell indices to neighbors under the two supported layouts:
//! circular sequences (wrapping, single successor direction) and bounded
//! rectangular grids (four directions, no wraparound).

/// Unit offset between adjacent wave cells, as (row delta, column delta)
pub type Direction = [i32; 2];

/// Direction set for circular sequence waves
///
/// A single successor direction suffices: the ring wraps, so every ordered
/// neighbor pair is revised from its left cell.
pub const RING_DIRECTIONS: [Direction; 1] = [[0, 1]];

/// Direction set for bounded grid waves (down, up, right, left)
pub const GRID_DIRECTIONS: [Direction; 4] = [[1, 0], [-1, 0], [0, 1], [0, -1]];

/// Cell arrangement of a wave
///
/// Cells are addressed by flat index in both layouts; grids are row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Circular sequence; the successor of the last cell is the first
    Ring {
        /// Number of cells on the ring
        cells: usize,
    },

    /// Bounded rectangle; directions leading off-grid have no neighbor
    Grid {
        /// Number of cell rows
        rows: usize,
        /// Number of cell columns
        cols: usize,
    },
}

impl Topology {
    /// Total number of cells in the layout
    pub const fn cell_count(&self) -> usize {
        match self {
            Self::Ring { cells } => *cells,
            Self::Grid { rows, cols } => *rows * *cols,
        }
    }

    /// Directions along which adjacency constraints apply
    pub const fn directions(&self) -> &'static [Direction] {
        match self {
            Self::Ring { .. } => &RING_DIRECTIONS,
            Self::Grid { .. } => &GRID_DIRECTIONS,
        }
    }

    /// Neighbor of a cell along a direction, if one exists
    ///
    /// Ring neighbors wrap modulo the cell count; grid neighbors are `None`
    /// when the step leaves the rectangle.
    pub const fn neighbor(&self, cell: usize, direction: Direction) -> Option<usize> {
        match self {
            Self::Ring { cells } => {
                if *cells == 0 || direction[0] != 0 {
                    return None;
                }
                let step = cell as i64 + direction[1] as i64;
                Some(step.rem_euclid(*cells as i64) as usize)
            }
            Self::Grid { rows, cols } => {
                if *rows == 0 || *cols == 0 {
                    return None;
                }
                let row = (cell / *cols) as i64 + direction[0] as i64;
                let col = (cell % *cols) as i64 + direction[1] as i64;
                if row < 0 || col < 0 || row >= *rows as i64 || col >= *cols as i64 {
                    None
                } else {
                    Some(row as usize * *cols + col as usize)
                }
            }
        }
    }

    /// Row and column of a flat cell index
    ///
    /// Rings report every cell on row zero.
    pub const fn coordinates(&self, cell: usize) -> [usize; 2] {
        match self {
            Self::Ring { .. } => [0, cell],
            Self::Grid { cols, .. } => {
                if *cols == 0 {
                    [0, 0]
                } else {
                    [cell / *cols, cell % *cols]
                }
            }
        }
    }
}
