//! Shared types and constants.
//!
//! Everything here is plain data with no dependencies, so it can be used by
//! the engine, the terminal front-end and the adapter protocol alike.
//!
//! # Grid Dimensions
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Shape box**: 4x4 for every piece
//! - **Spawn column**: `COLUMNS / 2 - 2` (3), the 4-wide box centered
//!
//! # Cell Values
//!
//! | Value | Meaning |
//! |-------|---------|
//! | 0 | empty |
//! | 1 | locked (settled) |
//! | 2 | active piece (render overlay only) |
//!
//! # Examples
//!
//! ```
//! use mini_tetris_types::{Action, CellState, ShapeKind, COLUMNS, ROWS};
//!
//! assert_eq!(Action::from_str("left"), Some(Action::Left));
//! assert_eq!(Action::from_str("ROTATE"), Some(Action::Rotate));
//! assert_eq!(Action::from_str("jump"), None);
//!
//! assert_eq!(CellState::Active.as_u8(), 2);
//! assert_eq!(ShapeKind::ALL.len(), 5);
//! assert_eq!((ROWS, COLUMNS), (20, 10));
//! ```

/// Grid height in cells.
pub const ROWS: usize = 20;

/// Grid width in cells.
pub const COLUMNS: usize = 10;

/// Side length of every shape's bounding box.
pub const SHAPE_SIZE: usize = 4;

/// Row a freshly spawned piece starts on.
pub const SPAWN_ROW: i8 = 0;

/// Column a freshly spawned piece starts on (4-wide box centered).
pub const SPAWN_COL: i8 = (COLUMNS / 2) as i8 - 2;

/// Rendered grid: one cell-state value per cell, row-major.
pub type RenderGrid = [[u8; COLUMNS]; ROWS];

/// State of a single grid cell.
///
/// The settled grid only ever holds `Empty` or `Locked`; `Active` exists so
/// render output can mark where the falling piece is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Empty = 0,
    Locked = 1,
    Active = 2,
}

impl CellState {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a rendered cell value.
    ///
    /// ```
    /// use mini_tetris_types::CellState;
    ///
    /// assert_eq!(CellState::from_u8(1), Some(CellState::Locked));
    /// assert_eq!(CellState::from_u8(9), None);
    /// ```
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(CellState::Empty),
            1 => Some(CellState::Locked),
            2 => Some(CellState::Active),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == CellState::Empty
    }
}

/// The five piece silhouettes in the catalog.
///
/// - **Bar**: 1x4 horizontal line
/// - **Square**: 2x2 block
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **T**: three across with one below the middle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Bar,
    Square,
    S,
    Z,
    T,
}

impl ShapeKind {
    /// Catalog order; spawn picks an index into this uniformly.
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Bar,
        ShapeKind::Square,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::T,
    ];

    pub fn index(self) -> usize {
        match self {
            ShapeKind::Bar => 0,
            ShapeKind::Square => 1,
            ShapeKind::S => 2,
            ShapeKind::Z => 3,
            ShapeKind::T => 4,
        }
    }

    /// Lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Bar => "bar",
            ShapeKind::Square => "square",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::T => "t",
        }
    }

    /// Parse a kind from its name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bar" => Some(ShapeKind::Bar),
            "square" => Some(ShapeKind::Square),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "t" => Some(ShapeKind::T),
            _ => None,
        }
    }
}

/// Discrete commands a collaborator can send to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Shift one column left
    Left,
    /// Shift one column right
    Right,
    /// Descend one row, locking the piece if it cannot
    Down,
    /// Quarter-turn clockwise inside the 4x4 box
    Rotate,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Left, Action::Right, Action::Down, Action::Rotate];

    /// Parse an action identifier (`left|right|down|rotate`, case-insensitive).
    ///
    /// Anything else returns `None`; collaborators treat that as a no-op.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Some(Action::Left),
            "right" => Some(Action::Right),
            "down" => Some(Action::Down),
            "rotate" => Some(Action::Rotate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Down => "down",
            Action::Rotate => "rotate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_col_centers_four_wide_box() {
        assert_eq!(SPAWN_COL, 3);
        assert_eq!(SPAWN_ROW, 0);
    }

    #[test]
    fn action_names_roundtrip() {
        for action in Action::ALL {
            assert_eq!(Action::from_str(action.as_str()), Some(action));
        }
        assert_eq!(Action::from_str(" Down "), Some(Action::Down));
        assert_eq!(Action::from_str(""), None);
        assert_eq!(Action::from_str("hardDrop"), None);
    }

    #[test]
    fn shape_kind_index_matches_catalog_order() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn cell_state_values() {
        assert_eq!(CellState::default(), CellState::Empty);
        assert_eq!(CellState::Empty.as_u8(), 0);
        assert_eq!(CellState::Locked.as_u8(), 1);
        assert_eq!(CellState::Active.as_u8(), 2);
        assert!(CellState::Empty.is_empty());
        assert!(!CellState::Locked.is_empty());
    }
}
