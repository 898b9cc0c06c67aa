//! Grid tests - bounds-checked access to the settled cells

use mini_tetris::core::{ActivePiece, Game, Grid};
use mini_tetris::types::{Action, CellState, ShapeKind, COLUMNS, ROWS};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.rows(), ROWS);
    assert_eq!(grid.columns(), COLUMNS);

    for r in 0..ROWS as i8 {
        for c in 0..COLUMNS as i8 {
            assert!(grid.is_vacant(r, c), "Cell ({}, {}) should be vacant", r, c);
            assert_eq!(grid.get(r, c), Some(CellState::Empty));
        }
    }
}

#[test]
fn test_grid_out_of_bounds() {
    let mut grid = Grid::new();

    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(ROWS as i8, 0), None);
    assert_eq!(grid.get(0, COLUMNS as i8), None);

    // Out of bounds is never vacant, and writes there are refused.
    assert!(!grid.is_vacant(-1, 4));
    assert!(!grid.is_vacant(4, COLUMNS as i8));
    assert!(!grid.lock(ROWS as i8, 0));
    assert_eq!(grid.locked_count(), 0);
}

#[test]
fn test_grid_lock_is_permanent() {
    let mut grid = Grid::new();
    assert!(grid.lock(19, 0));
    assert!(grid.is_locked(19, 0));
    assert!(!grid.is_vacant(19, 0));

    // Locking again is idempotent; nothing un-locks a cell.
    assert!(grid.lock(19, 0));
    assert_eq!(grid.locked_count(), 1);

    let mut game = Game::from_parts(grid, ActivePiece::spawn(ShapeKind::Bar), 3);
    for _ in 0..100 {
        game.apply(Action::Down);
    }
    assert!(game.grid().is_locked(19, 0));
}

#[test]
fn test_grid_round_trips_through_u8_rows() {
    let mut rows = [[0u8; COLUMNS]; ROWS];
    rows[19] = [1; COLUMNS];
    rows[18][3] = 1;
    // Any non-zero value reads back as locked.
    rows[0][0] = 2;

    let grid = Grid::from_rows(&rows);
    assert!(grid.is_row_full(19));
    assert!(!grid.is_row_full(18));
    assert!(grid.is_locked(0, 0));

    let mut out = [[9u8; COLUMNS]; ROWS];
    grid.write_u8_grid(&mut out);
    rows[0][0] = 1;
    assert_eq!(out, rows);
}
