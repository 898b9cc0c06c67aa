//! Adapter - remote control of a game over TCP with a JSON protocol
//!
//! # Protocol Overview
//!
//! Line-delimited JSON over TCP (default `127.0.0.1:7878`). Each request line
//! gets exactly one response line.
//!
//! 1. **Handshake**: client sends `hello`, server answers `welcome`
//! 2. **Moves**: `move` applies one action (`left`, `right`, `down`,
//!    `rotate`) and answers with the rendered `board`
//! 3. **Observation**: `observe` answers with the `board` unchanged
//!
//! An unrecognized action name is a no-op that still returns the board. Any
//! other problem is reported as an `error` with a stable `code`:
//! `handshake_required`, `protocol_mismatch`, `invalid_message`,
//! `unknown_type`, `line_too_long` (the last one closes the connection).
//!
//! ```text
//! -> {"type":"hello","seq":1,"client":{"name":"bot","version":"0.1"},"protocol_version":"1.0.0"}
//! <- {"type":"welcome","seq":1,"ts":...,"protocol_version":"1.0.0","client_id":1,"rows":20,"columns":10,...}
//! -> {"type":"move","seq":2,"action":"rotate"}
//! <- {"type":"board","seq":2,"ts":...,"action":"rotate","outcome":"rotated","cells":[[0,0,...],...],...}
//! ```
//!
//! All clients share one [`SharedGame`]; see [`config`] for the environment
//! variables.

pub mod config;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod shared;

pub use mini_tetris_core as core;
pub use mini_tetris_types as types;

pub use config::{ConfigError, GameConfig, ServerConfig, PROTOCOL_VERSION};
pub use protocol::*;
pub use runtime::AdapterRuntime;
pub use server::run_server;
pub use shared::{Dispatched, SharedGame};
