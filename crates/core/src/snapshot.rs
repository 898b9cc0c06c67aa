use crate::game::ActivePiece;
use crate::types::{RenderGrid, ShapeKind, COLUMNS, ROWS, SHAPE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub row: i8,
    pub col: i8,
    pub shape: [[u8; SHAPE_SIZE]; SHAPE_SIZE],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            row: value.row,
            col: value.col,
            shape: *value.shape.rows(),
        }
    }
}

/// Read-only copy of everything an observer may show.
///
/// `board` is the render output (0 empty, 1 locked, 2 active).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: RenderGrid,
    pub active: ActiveSnapshot,
    pub seed: u32,
    pub pieces_spawned: u32,
    pub pieces_locked: u32,
    /// Active piece overlaps the stack (spawned onto a full column)
    pub overlapping: bool,
}

impl GameSnapshot {
    /// Cells currently holding the given value
    pub fn count(&self, value: u8) -> usize {
        self.board.iter().flatten().filter(|v| **v == value).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; COLUMNS]; ROWS],
            active: ActiveSnapshot {
                kind: ShapeKind::Bar,
                row: 0,
                col: 0,
                shape: [[0u8; SHAPE_SIZE]; SHAPE_SIZE],
            },
            seed: 0,
            pieces_spawned: 0,
            pieces_locked: 0,
            overlapping: false,
        }
    }
}
