//! Protocol module - JSON message types for the TCP adapter
//!
//! Line-delimited JSON. Every message has `type`, `seq` and `ts` (ms since
//! the Unix epoch). Responses echo the `seq` of the request they answer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{GameSnapshot, Outcome};
use crate::types::{Action, RenderGrid, COLUMNS, ROWS};

// ============== Client -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HelloType {
    #[default]
    #[serde(rename = "hello")]
    Hello,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MoveType {
    #[default]
    #[serde(rename = "move")]
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObserveType {
    #[default]
    #[serde(rename = "observe")]
    Observe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// Handshake; must precede `move` and `observe`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
}

/// Apply one action, then answer with the board.
///
/// `action` is kept as the raw string: unrecognized names are a no-op, not a
/// protocol error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: MoveType,
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub action: String,
}

impl MoveMessage {
    pub fn parsed_action(&self) -> Option<Action> {
        Action::from_str(&self.action)
    }
}

/// Answer with the board without changing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserveMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ObserveType,
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
}

/// Parsed incoming message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Move(MoveMessage),
    Observe(ObserveMessage),
    Unknown { seq: Option<u64>, msg_type: String },
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("malformed {msg_type} message: {reason}")]
    Malformed {
        msg_type: String,
        seq: Option<u64>,
        reason: String,
    },
    #[error("line is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },
}

impl ProtocolError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProtocolError::InvalidJson(_)
            | ProtocolError::InvalidUtf8(_)
            | ProtocolError::Malformed { .. } => ErrorCode::InvalidMessage,
            ProtocolError::LineTooLong { .. } => ErrorCode::LineTooLong,
        }
    }

    /// Request `seq`, if it could be recovered
    pub fn seq(&self) -> Option<u64> {
        match self {
            ProtocolError::Malformed { seq, .. } => *seq,
            _ => None,
        }
    }
}

/// Parse one inbound line.
pub fn parse_message(json: &str) -> Result<ParsedMessage, ProtocolError> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "move")]
        Move(MoveMessage),
        #[serde(rename = "observe")]
        Observe(ObserveMessage),
    }

    let err = match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => return Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Move(m)) => return Ok(ParsedMessage::Move(m)),
        Ok(InboundMessage::Observe(m)) => return Ok(ParsedMessage::Observe(m)),
        Err(e) => e,
    };

    // Not one of ours as a whole; look at just the envelope to decide whether
    // this is an unknown type or a broken known one.
    #[derive(Debug, Deserialize)]
    struct Envelope {
        #[serde(rename = "type")]
        msg_type: Option<String>,
        seq: Option<u64>,
    }
    let envelope = serde_json::from_str::<Envelope>(json)?;
    match envelope.msg_type {
        Some(t) if matches!(t.as_str(), "hello" | "move" | "observe") => {
            Err(ProtocolError::Malformed {
                msg_type: t,
                seq: envelope.seq,
                reason: err.to_string(),
            })
        }
        Some(t) => Ok(ParsedMessage::Unknown {
            seq: envelope.seq,
            msg_type: t,
        }),
        None => Err(ProtocolError::Malformed {
            msg_type: "untyped".to_string(),
            seq: envelope.seq,
            reason: "missing \"type\"".to_string(),
        }),
    }
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardType {
    #[serde(rename = "board")]
    Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    HandshakeRequired,
    ProtocolMismatch,
    InvalidMessage,
    UnknownType,
    LineTooLong,
}

/// Response to hello
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub client_id: u64,
    pub rows: u8,
    pub columns: u8,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeName {
    Moved,
    Rotated,
    Locked,
    Rejected,
}

impl From<Outcome> for OutcomeName {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Moved => OutcomeName::Moved,
            Outcome::Rotated => OutcomeName::Rotated,
            Outcome::Locked => OutcomeName::Locked,
            Outcome::Rejected => OutcomeName::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveView {
    pub kind: String,
    pub row: i8,
    pub col: i8,
}

/// Rendered board after a `move` or `observe`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMessage {
    #[serde(rename = "type")]
    pub msg_type: BoardType,
    pub seq: u64,
    pub ts: u64,
    /// Applied action; `None` for observe and for unrecognized names
    pub action: Option<String>,
    pub outcome: Option<OutcomeName>,
    /// 0 empty, 1 locked, 2 active piece
    pub cells: RenderGrid,
    pub active: ActiveView,
    pub pieces_locked: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: Option<u64>,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

// ============== Utility Functions ==============

pub fn create_hello(seq: u64, client_name: &str, protocol_version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: protocol_version.to_string(),
    }
}

pub fn create_move(seq: u64, action: &str) -> MoveMessage {
    MoveMessage {
        msg_type: MoveType::Move,
        seq,
        ts: current_timestamp_ms(),
        action: action.to_string(),
    }
}

pub fn create_observe(seq: u64) -> ObserveMessage {
    ObserveMessage {
        msg_type: ObserveType::Observe,
        seq,
        ts: current_timestamp_ms(),
    }
}

pub fn create_welcome(seq: u64, protocol_version: &str, client_id: u64) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: protocol_version.to_string(),
        client_id,
        rows: ROWS as u8,
        columns: COLUMNS as u8,
        actions: Action::ALL.iter().map(|a| a.as_str().to_string()).collect(),
    }
}

pub fn create_board(
    seq: u64,
    action: Option<Action>,
    outcome: Option<Outcome>,
    snap: &GameSnapshot,
) -> BoardMessage {
    BoardMessage {
        msg_type: BoardType::Board,
        seq,
        ts: current_timestamp_ms(),
        action: action.map(|a| a.as_str().to_string()),
        outcome: outcome.map(OutcomeName::from),
        cells: snap.board,
        active: ActiveView {
            kind: snap.active.kind.as_str().to_string(),
            row: snap.active.row,
            col: snap.active.col,
        },
        pieces_locked: snap.pieces_locked,
    }
}

pub fn create_error(seq: Option<u64>, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Same major version (`1.x.y` talks to `1.a.b`)
pub fn versions_compatible(ours: &str, theirs: &str) -> bool {
    let major = |v: &str| v.trim().split('.').next().map(str::to_string);
    matches!((major(ours), major(theirs)), (Some(a), Some(b)) if !a.is_empty() && a == b)
}

fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hello() {
        let json = r#"{"type":"hello","seq":1,"ts":5,"client":{"name":"bot","version":"0.1"},"protocol_version":"1.0.0"}"#;
        match parse_message(json).unwrap() {
            ParsedMessage::Hello(msg) => {
                assert_eq!(msg.seq, 1);
                assert_eq!(msg.client.name, "bot");
                assert_eq!(msg.protocol_version, "1.0.0");
            }
            other => panic!("Expected Hello message, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_move_keeps_unknown_action() {
        let json = r#"{"type":"move","seq":2,"action":"teleport"}"#;
        match parse_message(json).unwrap() {
            ParsedMessage::Move(msg) => {
                assert_eq!(msg.ts, 0);
                assert_eq!(msg.parsed_action(), None);
            }
            other => panic!("Expected Move message, got {:?}", other),
        }

        let json = r#"{"type":"move","seq":3,"action":"Rotate"}"#;
        match parse_message(json).unwrap() {
            ParsedMessage::Move(msg) => assert_eq!(msg.parsed_action(), Some(Action::Rotate)),
            other => panic!("Expected Move message, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_type() {
        let json = r#"{"type":"hold","seq":9}"#;
        assert_eq!(
            parse_message(json).unwrap(),
            ParsedMessage::Unknown {
                seq: Some(9),
                msg_type: "hold".to_string()
            }
        );
    }

    #[test]
    fn test_parse_malformed_known_type_keeps_seq() {
        let err = parse_message(r#"{"type":"move","seq":4}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidMessage);
        assert_eq!(err.seq(), Some(4));
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_message("not json").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidJson(_)));
        assert_eq!(err.seq(), None);
    }

    #[test]
    fn test_error_code_wire_names() {
        let err = create_error(Some(1), ErrorCode::HandshakeRequired, "hello first");
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "handshake_required");
        assert_eq!(v["seq"], 1);
    }

    #[test]
    fn test_board_message_shape() {
        let snap = crate::core::Game::new(3).snapshot();
        let msg = create_board(7, Some(Action::Left), Some(Outcome::Moved), &snap);
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["type"], "board");
        assert_eq!(v["action"], "left");
        assert_eq!(v["outcome"], "moved");
        assert_eq!(v["cells"].as_array().unwrap().len(), ROWS);
        assert_eq!(v["cells"][0].as_array().unwrap().len(), COLUMNS);
    }

    #[test]
    fn test_client_constructors_parse_back() {
        let hello = serde_json::to_string(&create_hello(1, "bot", "1.0.0")).unwrap();
        assert!(hello.contains(r#""type":"hello""#));
        assert!(matches!(parse_message(&hello).unwrap(), ParsedMessage::Hello(h) if h.seq == 1));

        let mv = serde_json::to_string(&create_move(2, "down")).unwrap();
        match parse_message(&mv).unwrap() {
            ParsedMessage::Move(m) => assert_eq!(m.parsed_action(), Some(Action::Down)),
            other => panic!("Expected Move message, got {:?}", other),
        }

        let obs = serde_json::to_string(&create_observe(3)).unwrap();
        match parse_message(&obs).unwrap() {
            ParsedMessage::Observe(o) => {
                assert_eq!(o.msg_type, ObserveType::Observe);
                assert_eq!(o.seq, 3);
            }
            other => panic!("Expected Observe message, got {:?}", other),
        }
    }

    #[test]
    fn test_versions_compatible() {
        assert!(versions_compatible("1.0.0", "1.4.2"));
        assert!(!versions_compatible("1.0.0", "2.0.0"));
        assert!(!versions_compatible("1.0.0", ""));
    }
}
