//! TCP server for remote control
//!
//! One task per connection. Each request line gets exactly one response
//! line; every game mutation goes through [`SharedGame`], so clients never
//! observe a half-applied move.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};

use crate::config::ServerConfig;
use crate::protocol::*;
use crate::shared::SharedGame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Direction {
    In,
    Out,
}

/// One JSONL entry in the wire log
#[derive(Debug, Clone, Serialize)]
struct WireRecord {
    ts: u64,
    client_id: u64,
    direction: Direction,
    line: String,
}

const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

type WireLog = Option<mpsc::UnboundedSender<WireRecord>>;

fn spawn_wire_log(path: PathBuf) -> mpsc::UnboundedSender<WireRecord> {
    let (tx, mut rx) = mpsc::unbounded_channel::<WireRecord>();
    tokio::spawn(async move {
        use tokio::fs::OpenOptions;

        let mut file = match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
        {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "wire log disabled");
                return;
            }
        };

        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(rec) = rx.recv().await {
            buf.clear();
            if serde_json::to_writer(&mut buf, &rec).is_err() {
                continue;
            }
            buf.push(b'\n');
            if let Err(e) = file.write_all(&buf).await {
                tracing::warn!(error = %e, "wire log write failed");
                break;
            }
        }
        let _ = file.flush().await;
    });
    tx
}

fn log_wire(wire: &WireLog, client_id: u64, direction: Direction, line: &str) {
    if let Some(tx) = wire {
        let _ = tx.send(WireRecord {
            ts: now_ms(),
            client_id,
            direction,
            line: line.to_string(),
        });
    }
}

/// Accept connections until the listener fails.
///
/// `ready_tx` receives the bound address once listening; pass port `0` in the
/// config to get an ephemeral port.
pub async fn run_server(
    config: ServerConfig,
    game: SharedGame,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let wire: WireLog = config.wire_log.clone().map(spawn_wire_log);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let bound = listener.local_addr()?;
    tracing::info!(addr = %bound, protocol = %config.protocol_version, "adapter listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0u64;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        tracing::info!(client_id, %addr, "client connected");

        let conn = Connection {
            client_id,
            config: config.clone(),
            game: game.clone(),
            wire: wire.clone(),
        };
        tokio::spawn(async move {
            if let Err(e) = conn.serve(socket).await {
                tracing::warn!(client_id, error = %e, "client error");
            }
            tracing::info!(client_id, "client disconnected");
        });
    }
}

struct Connection {
    client_id: u64,
    config: ServerConfig,
    game: SharedGame,
    wire: WireLog,
}

/// What to do with the connection after answering a line
enum Flow {
    Continue,
    Close,
}

impl Connection {
    async fn serve(self, socket: TcpStream) -> anyhow::Result<()> {
        let (reader, mut writer) = socket.into_split();
        let mut reader = BufReader::new(reader);
        let mut handshaken = false;
        let mut buf: Vec<u8> = Vec::new();
        let limit = self.config.max_line_bytes;
        // One byte past the limit (plus the newline) tells us it was exceeded.
        let read_cap = (limit as u64).saturating_add(2);

        loop {
            buf.clear();
            let bytes_read = (&mut reader).take(read_cap).read_until(b'\n', &mut buf).await?;
            if bytes_read == 0 {
                break;
            }

            let terminated = buf.ends_with(b"\n");
            let mut end = buf.len();
            while end > 0 && matches!(buf[end - 1], b'\n' | b'\r') {
                end -= 1;
            }
            if end > limit {
                let err = ProtocolError::LineTooLong { limit };
                tracing::warn!(client_id = self.client_id, %err, "closing connection");
                if !terminated {
                    // Unread input would turn our close into a reset.
                    let _ = tokio::time::timeout(DRAIN_TIMEOUT, discard_line(&mut reader)).await;
                }
                let msg = create_error(None, err.code(), &err.to_string());
                self.send(&mut writer, &msg).await?;
                break;
            }

            let raw = match std::str::from_utf8(&buf[..end]) {
                Ok(raw) => raw,
                Err(e) => {
                    let err = ProtocolError::from(e);
                    tracing::warn!(client_id = self.client_id, %err, "rejected message");
                    let msg = create_error(None, err.code(), &err.to_string());
                    self.send(&mut writer, &msg).await?;
                    continue;
                }
            };

            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            log_wire(&self.wire, self.client_id, Direction::In, trimmed);

            match self.handle_line(trimmed, &mut handshaken, &mut writer).await? {
                Flow::Continue => {}
                Flow::Close => break,
            }
        }

        let _ = writer.shutdown().await;
        Ok(())
    }

    async fn handle_line<W: AsyncWriteExt + Unpin>(
        &self,
        line: &str,
        handshaken: &mut bool,
        writer: &mut W,
    ) -> anyhow::Result<Flow> {
        let parsed = match parse_message(line) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(client_id = self.client_id, %err, "rejected message");
                let msg = create_error(err.seq(), err.code(), &err.to_string());
                self.send(writer, &msg).await?;
                return Ok(Flow::Continue);
            }
        };

        match parsed {
            ParsedMessage::Hello(hello) => {
                if !versions_compatible(&self.config.protocol_version, &hello.protocol_version) {
                    let msg = create_error(
                        Some(hello.seq),
                        ErrorCode::ProtocolMismatch,
                        &format!(
                            "protocol version {} not supported (server {})",
                            hello.protocol_version, self.config.protocol_version
                        ),
                    );
                    self.send(writer, &msg).await?;
                    return Ok(Flow::Close);
                }
                *handshaken = true;
                tracing::info!(
                    client_id = self.client_id,
                    name = %hello.client.name,
                    version = %hello.client.version,
                    "handshake complete"
                );
                let msg = create_welcome(hello.seq, &self.config.protocol_version, self.client_id);
                self.send(writer, &msg).await?;
            }
            ParsedMessage::Move(mv) if *handshaken => {
                let action = mv.parsed_action();
                if action.is_none() {
                    tracing::debug!(client_id = self.client_id, action = %mv.action, "unknown action ignored");
                }
                let done = self.game.dispatch(action).await;
                tracing::debug!(
                    client_id = self.client_id,
                    seq = mv.seq,
                    action = action.map(|a| a.as_str()),
                    outcome = done.outcome.map(|o| o.as_str()),
                    "move applied"
                );
                let msg = create_board(mv.seq, action, done.outcome, &done.snapshot);
                self.send(writer, &msg).await?;
            }
            ParsedMessage::Observe(obs) if *handshaken => {
                let snap = self.game.snapshot().await;
                let msg = create_board(obs.seq, None, None, &snap);
                self.send(writer, &msg).await?;
            }
            ParsedMessage::Move(MoveMessage { seq, .. })
            | ParsedMessage::Observe(ObserveMessage { seq, .. }) => {
                let msg = create_error(Some(seq), ErrorCode::HandshakeRequired, "send hello first");
                self.send(writer, &msg).await?;
            }
            ParsedMessage::Unknown { seq, msg_type } => {
                tracing::warn!(client_id = self.client_id, %msg_type, "unknown message type");
                let msg = create_error(
                    seq,
                    ErrorCode::UnknownType,
                    &format!("unknown message type {msg_type:?}"),
                );
                self.send(writer, &msg).await?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn send<W, T>(&self, writer: &mut W, msg: &T) -> anyhow::Result<()>
    where
        W: AsyncWriteExt + Unpin,
        T: Serialize,
    {
        let line = serde_json::to_string(msg)?;
        log_wire(&self.wire, self.client_id, Direction::Out, &line);
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }
}

/// Consume input up to and including the next newline.
async fn discard_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<()> {
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(());
        }
        match buf.iter().position(|b| *b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let n = buf.len();
                reader.consume(n);
            }
        }
    }
}

fn now_ms() -> u64 {
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
    fn wire_record_is_one_json_object() {
        let rec = WireRecord {
            ts: 1,
            client_id: 2,
            direction: Direction::In,
            line: r#"{"type":"observe","seq":1}"#.to_string(),
        };
        let v: serde_json::Value = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["direction"], "in");
        assert_eq!(v["client_id"], 2);
        assert_eq!(v["line"], r#"{"type":"observe","seq":1}"#);
    }
}
