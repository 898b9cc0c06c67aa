//! Terminal input mapping.
//!
//! Maps `crossterm` key events onto engine [`Action`](crate::types::Action)s.
//! There is no key-repeat handling here: every key press is one discrete
//! command, and the terminal's own auto-repeat is left to the caller.

pub mod map;

pub use mini_tetris_types as types;

pub use map::{handle_key_event, should_quit, KeyCommand};
