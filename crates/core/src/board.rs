//! Board module - manages the game grid
//!
//! The board is a fixed-size stack of rows; each row holds exactly `width`
//! cells, either empty or the color of the piece that filled it.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Rows above the board (y < 0) are allowed for falling pieces but are never
//! stored.

use arrayvec::ArrayVec;

use crate::config::{BoardConfig, MAX_BOARD_DIM};
use crate::pieces::Shape;
use crate::types::{Cell, PieceColor};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    config: BoardConfig,
    width: usize,
    /// Row 0 is the top of the playfield.
    rows: Vec<Vec<Cell>>,
}

impl Board {
    /// Create a new empty board of the configured size
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            width: config.width(),
            rows: vec![vec![None; config.width()]; config.height()],
        }
    }

    /// Dimensions this board was built with.
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Map signed coordinates to indices, `None` when off the board.
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.rows.len() {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|(x, y)| self.rows[y][x])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some((x, y)) => {
                self.rows[y][x] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether `shape` fits with its top-left corner at (x, y).
    ///
    /// Every occupied cell must lie within the side walls and above the floor,
    /// and must not overlap a filled board cell. Cells above the top edge are
    /// only checked against the walls.
    pub fn is_valid_placement(&self, shape: &Shape, x: i32, y: i32) -> bool {
        for (dx, dy) in shape.filled_cells() {
            let ax = x + dx;
            let ay = y + dy;
            if ax < 0 || ax as usize >= self.width {
                return false;
            }
            if ay >= self.rows.len() as i32 {
                return false;
            }
            if ay >= 0 && self.rows[ay as usize][ax as usize].is_some() {
                return false;
            }
        }
        true
    }

    /// Write `color` into every cell covered by `shape` at (x, y).
    ///
    /// The placement must already be valid. Cells that would land above the
    /// board are dropped.
    pub fn lock(&mut self, shape: &Shape, color: PieceColor, x: i32, y: i32) {
        for (dx, dy) in shape.filled_cells() {
            self.set(x + dx, y + dy, Some(color));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Borrow a single row.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        self.rows.get(y).map(|row| row.as_slice())
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    /// Remove every full row, compacting the rows above downward.
    ///
    /// Rows are scanned bottom to top. `on_row` sees each full row just before
    /// it is removed, with its current index. After a removal an empty row is
    /// pushed in at the top and the same index is examined again, since it now
    /// holds the row that was above. Returns those indices in scan order.
    pub fn clear_full_rows(
        &mut self,
        mut on_row: impl FnMut(usize, &[Cell]),
    ) -> ArrayVec<usize, MAX_BOARD_DIM> {
        let mut cleared = ArrayVec::new();
        let mut y = self.rows.len();

        while y > 0 {
            let idx = y - 1;
            if self.is_row_full(idx) {
                on_row(idx, &self.rows[idx]);
                self.rows.remove(idx);
                self.rows.insert(0, vec![None; self.width]);
                // At most `height` rows can ever be removed in one pass.
                cleared.push(idx);
                // Re-examine the same index.
                continue;
            }
            y -= 1;
        }

        cleared
    }

    /// Number of filled cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_some()).count())
            .sum()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}
