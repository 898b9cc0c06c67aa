//! Mini Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, tests and
//! benches can write `mini_tetris::core::Game` and friends.

pub use mini_tetris_adapter as adapter;
pub use mini_tetris_core as core;
pub use mini_tetris_input as input;
pub use mini_tetris_term as term;
pub use mini_tetris_types as types;
