//! Environment configuration.
//!
//! | Variable | Default | |
//! |----------|---------|-|
//! | `MINI_TETRIS_HOST` | `127.0.0.1` | bind host |
//! | `MINI_TETRIS_PORT` | `7878` | bind port, `0` for ephemeral |
//! | `MINI_TETRIS_MAX_LINE` | `4096` | max inbound line length in bytes |
//! | `MINI_TETRIS_WIRE_LOG` | unset | append every wire message to this JSONL file |
//! | `MINI_TETRIS_SEED` | clock | fixed game seed |
//! | `MINI_TETRIS_GRAVITY_MS` | `800` | terminal auto-drop interval, `0` disables |
//! | `MINI_TETRIS_ADAPTER` | off | `1`/`true`: terminal binary also serves TCP |

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7878;
pub const DEFAULT_MAX_LINE_BYTES: usize = 4096;
pub const DEFAULT_GRAVITY_MS: u64 = 800;
pub const PROTOCOL_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: expected {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// TCP adapter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
    pub max_line_bytes: usize,
    pub wire_log: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            protocol_version: PROTOCOL_VERSION.to_string(),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            wire_log: None,
        }
    }
}

impl ServerConfig {
    /// Read from the process environment, falling back to defaults (with a
    /// warning) if anything is malformed.
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid server configuration, using defaults");
            Self::default()
        })
    }

    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(host) = non_empty(lookup("MINI_TETRIS_HOST")) {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "MINI_TETRIS_PORT", "a port number")? {
            config.port = port;
        }
        if let Some(max) = parse_var::<usize>(&lookup, "MINI_TETRIS_MAX_LINE", "a byte count")? {
            if max == 0 {
                return Err(ConfigError::Invalid {
                    var: "MINI_TETRIS_MAX_LINE",
                    value: "0".to_string(),
                    expected: "a byte count",
                });
            }
            config.max_line_bytes = max;
        }
        config.wire_log = non_empty(lookup("MINI_TETRIS_WIRE_LOG")).map(PathBuf::from);
        Ok(config)
    }

    /// `host:port` as passed to the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the local (terminal) game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: Option<u32>,
    /// Auto-drop interval; `None` disables gravity
    pub gravity_ms: Option<u64>,
    /// Also run the TCP adapter against the same game
    pub serve: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            gravity_ms: Some(DEFAULT_GRAVITY_MS),
            serve: false,
        }
    }
}

impl GameConfig {
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.seed = parse_var(&lookup, "MINI_TETRIS_SEED", "a 32-bit seed")?;
        if let Some(ms) = parse_var::<u64>(&lookup, "MINI_TETRIS_GRAVITY_MS", "milliseconds")? {
            config.gravity_ms = (ms > 0).then_some(ms);
        }
        config.serve = match non_empty(lookup("MINI_TETRIS_ADAPTER")) {
            None => false,
            Some(v) => parse_flag(&v).ok_or(ConfigError::Invalid {
                var: "MINI_TETRIS_ADAPTER",
                value: v,
                expected: "a boolean (1/0/true/false)",
            })?,
        };
        Ok(config)
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match non_empty(lookup(var)) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                var,
                value,
                expected,
            }),
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
