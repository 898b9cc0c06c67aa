//! Grid module - the settled board
//!
//! A fixed 20x10 array of cells, each either empty or locked. Stored flat in
//! row-major order (`row * COLUMNS + col`).
//! Coordinates are `(row, col)` with row 0 at the top; signed so callers can
//! probe positions just outside the board without casting.

use crate::types::{CellState, RenderGrid, COLUMNS, ROWS};

const GRID_SIZE: usize = ROWS * COLUMNS;

/// The settled grid. Only `Empty` and `Locked` are ever stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [CellState; GRID_SIZE],
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [CellState::Empty; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if !Self::in_bounds(row, col) {
            return None;
        }
        Some((row as usize) * COLUMNS + (col as usize))
    }

    pub fn rows(&self) -> usize {
        ROWS
    }

    pub fn columns(&self) -> usize {
        COLUMNS
    }

    pub fn in_bounds(row: i8, col: i8) -> bool {
        row >= 0 && (row as usize) < ROWS && col >= 0 && (col as usize) < COLUMNS
    }

    /// Get the cell at `(row, col)`, `None` when out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<CellState> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Lock the cell at `(row, col)`.
    /// Returns false if out of bounds (nothing is written).
    pub fn lock(&mut self, row: i8, col: i8) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = CellState::Locked;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_vacant(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(CellState::Empty))
    }

    /// In bounds and locked
    pub fn is_locked(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(CellState::Locked))
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        let start = row * COLUMNS;
        self.cells[start..start + COLUMNS]
            .iter()
            .all(|c| *c == CellState::Locked)
    }

    pub fn locked_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == CellState::Locked)
            .count()
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Write the settled cells into a render grid (0 = empty, 1 = locked).
    pub fn write_u8_grid(&self, out: &mut RenderGrid) {
        for (row, out_row) in out.iter_mut().enumerate() {
            let start = row * COLUMNS;
            for (col, v) in out_row.iter_mut().enumerate() {
                *v = self.cells[start + col].as_u8();
            }
        }
    }

    /// Build a grid from rendered rows; any non-zero value counts as locked.
    pub fn from_rows(rows: &RenderGrid) -> Self {
        let mut grid = Self::new();
        for (row, cells) in rows.iter().enumerate() {
            for (col, v) in cells.iter().enumerate() {
                if *v != 0 {
                    grid.cells[row * COLUMNS + col] = CellState::Locked;
                }
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(0, 9), Some(9));
        assert_eq!(Grid::index(1, 0), Some(10));
        assert_eq!(Grid::index(19, 9), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(0, 10), None);
        assert_eq!(Grid::index(20, 0), None);
    }

    #[test]
    fn test_lock_in_and_out_of_bounds() {
        let mut grid = Grid::new();
        assert!(grid.lock(19, 0));
        assert!(grid.is_locked(19, 0));
        assert_eq!(grid.cells[19 * COLUMNS], CellState::Locked);
        assert!(!grid.lock(20, 0));
        assert!(!grid.lock(0, -1));
        assert_eq!(grid.locked_count(), 1);
    }

    #[test]
    fn test_row_full() {
        let mut grid = Grid::new();
        for col in 0..COLUMNS as i8 {
            grid.lock(5, col);
        }
        assert!(grid.is_row_full(5));
        assert!(!grid.is_row_full(6));
        assert!(!grid.is_row_full(ROWS));
        assert_eq!(grid.locked_count(), COLUMNS);
    }

    #[test]
    fn test_u8_grid_roundtrip() {
        let mut rows = [[0u8; COLUMNS]; ROWS];
        rows[3][4] = 1;
        rows[19][9] = 1;
        let grid = Grid::from_rows(&rows);

        let mut out = [[7u8; COLUMNS]; ROWS];
        grid.write_u8_grid(&mut out);
        assert_eq!(out, rows);
    }
}
