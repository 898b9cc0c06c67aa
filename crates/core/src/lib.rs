//! Core game logic - pure, deterministic, and testable
//!
//! This crate is the whole game: the grid, the piece catalog, and the state
//! machine that moves, rotates and locks the falling piece. It does no I/O
//! and holds no global state; whoever owns a [`Game`] decides how many exist
//! and how access to them is serialized.
//!
//! # Module Structure
//!
//! - [`grid`]: 20x10 settled grid with bounds-checked access
//! - [`shape`]: the five 4x4 piece templates and the clockwise remap
//! - [`rng`]: seeded uniform shape selection
//! - [`game`]: the engine (`move_left`, `move_right`, `move_down`, `rotate`, `render`)
//! - [`snapshot`]: read-only copies for observers
//!
//! # Rules
//!
//! - A new piece spawns at row 0, column 3, chosen uniformly from the catalog
//! - Left/right/rotate are silently rejected when the result would leave the
//!   grid or overlap a locked cell
//! - Rotation has no wall kicks: it either fits where it is or it is rejected
//! - A piece that cannot descend locks in place and the next one spawns
//! - Full rows are never cleared and nothing is scored
//!
//! # Example
//!
//! ```
//! use mini_tetris_core::{DropOutcome, Game};
//!
//! let mut game = Game::new(12345);
//! game.rotate();
//! game.move_left();
//!
//! // Drop until the piece locks.
//! while game.move_down() == DropOutcome::Moved {}
//!
//! let board = game.render();
//! assert_eq!(game.active().row, 0);
//! assert!(board.iter().flatten().any(|v| *v == 1));
//! ```

pub mod game;
pub mod grid;
pub mod rng;
pub mod shape;
pub mod snapshot;

pub use mini_tetris_types as types;

pub use game::{ActivePiece, DropOutcome, Game, Outcome};
pub use grid::Grid;
pub use rng::SimpleRng;
pub use shape::{template, Shape, CATALOG};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
