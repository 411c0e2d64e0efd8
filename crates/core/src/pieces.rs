//! Pieces module - the piece catalog and shape rotation
//!
//! Shapes are small boolean grids (at most 4x4). Each catalog kind has one
//! base shape; rotation builds a new grid and never touches the catalog.

use serde::{Deserialize, Serialize};

use crate::types::{PieceColor, PieceKind};

/// Largest extent of any shape in either dimension.
pub const MAX_SHAPE_DIM: usize = 4;

/// One rotation state of a tetromino as a `rows x cols` occupancy grid.
///
/// Cells outside `rows x cols` are always `false`, so derived equality compares
/// shapes cell for cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from row strings, `'1'` or `'#'` marking occupied cells.
    ///
    /// Returns `None` for empty, ragged or oversized input.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let cols = rows.first()?.len();
        if rows.len() > MAX_SHAPE_DIM || cols == 0 || cols > MAX_SHAPE_DIM {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return None;
            }
            for (c, ch) in row.chars().enumerate() {
                cells[r][c] = matches!(ch, '1' | '#');
            }
        }

        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    const fn from_grid(
        rows: usize,
        cols: usize,
        cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
    ) -> Self {
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at `(row, col)` is occupied. Out of range is `false`.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row][col]
    }

    /// Occupied cells as `(dx, dy)` offsets from the top-left of the grid,
    /// in row-major order.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i32, r as i32))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.filled_cells().count()
    }

    /// Clockwise quarter turn: an R x C grid becomes C x R with
    /// `new[i][j] = old[R - 1 - j][i]`.
    pub fn rotated_cw(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, row) in cells.iter_mut().enumerate().take(self.cols) {
            for (j, cell) in row.iter_mut().enumerate().take(self.rows) {
                *cell = self.cells[self.rows - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

const X: bool = true;
const O: bool = false;

const I_SHAPE: Shape = Shape::from_grid(
    1,
    4,
    [[X, X, X, X], [O, O, O, O], [O, O, O, O], [O, O, O, O]],
);
const O_SHAPE: Shape = Shape::from_grid(
    2,
    2,
    [[X, X, O, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
);
const T_SHAPE: Shape = Shape::from_grid(
    2,
    3,
    [[X, X, X, O], [O, X, O, O], [O, O, O, O], [O, O, O, O]],
);
const L_SHAPE: Shape = Shape::from_grid(
    2,
    3,
    [[X, X, X, O], [X, O, O, O], [O, O, O, O], [O, O, O, O]],
);
const J_SHAPE: Shape = Shape::from_grid(
    2,
    3,
    [[X, X, X, O], [O, O, X, O], [O, O, O, O], [O, O, O, O]],
);
const S_SHAPE: Shape = Shape::from_grid(
    2,
    3,
    [[X, X, O, O], [O, X, X, O], [O, O, O, O], [O, O, O, O]],
);
const Z_SHAPE: Shape = Shape::from_grid(
    2,
    3,
    [[O, X, X, O], [X, X, O, O], [O, O, O, O], [O, O, O, O]],
);

/// Base (spawn) shape of a piece kind.
pub fn base_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// A catalog entry: kind, base shape and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogPiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: PieceColor,
}

impl CatalogPiece {
    pub fn of(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: base_shape(kind),
            color: kind.color(),
        }
    }
}

/// The full catalog in [`PieceKind::ALL`] order.
pub fn catalog() -> [CatalogPiece; 7] {
    PieceKind::ALL.map(CatalogPiece::of)
}

/// Spawn column for a shape: centered, biased left on odd remainders.
pub fn spawn_x(board_width: usize, shape: &Shape) -> i32 {
    (board_width / 2) as i32 - (shape.cols() / 2) as i32
}
