//! Terminal rendering for the game.
//!
//! Renders into a plain framebuffer that is then flushed to the terminal, so
//! the board layout can be tested without a TTY.
//!
//! - [`fb`]: framebuffer and style types
//! - [`game_view`]: snapshot → framebuffer (pure)
//! - [`renderer`]: framebuffer → terminal via crossterm

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use mini_tetris_core as core;
pub use mini_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_changed_rows_into, encode_full_into, TerminalRenderer};
