use std::future::Future;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId};

/// MCP server that communicates using newline-delimited JSON-RPC 2.0.
pub struct McpServer {
    config: ServerConfig,
    initialized: bool,
}

/// One newline-delimited frame read from the input.
enum Frame {
    Eof,
    /// A complete line (terminator included, if present) is in the buffer.
    Line,
    /// The line exceeded the limit and was discarded; carries its length.
    Oversized(usize),
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    InputClosed,
    Interrupted,
}

impl McpServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            initialized: false,
        }
    }

    /// Whether the `initialize` handshake has been received.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Serve stdin/stdout until stdin closes.
    pub async fn run(&mut self) -> Result<(), ServerError> {
        let reader = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.serve(reader, &mut stdout).await
    }

    /// Serve one session over an arbitrary reader/writer pair until EOF.
    pub async fn serve<R, W>(&mut self, mut reader: R, writer: &mut W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let limit = self.config.max_message_bytes;
        let mut raw = Vec::new();

        loop {
            raw.clear();
            match read_frame(&mut reader, &mut raw, limit).await? {
                Frame::Eof => {
                    tracing::info!("input closed, shutting down");
                    break;
                }
                Frame::Oversized(bytes) => {
                    tracing::warn!(bytes, limit, "message too large");
                    write_response(writer, &JsonRpcResponse::error(None, JsonRpcError::parse_error()))
                        .await?;
                    continue;
                }
                Frame::Line => {}
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(_) => {
                    tracing::warn!("message is not valid UTF-8");
                    write_response(writer, &JsonRpcResponse::error(None, JsonRpcError::parse_error()))
                        .await?;
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            // Syntax errors are -32700; well-formed JSON that is not a
            // request is -32600 and keeps whatever id could be read.
            let value: Value = match serde_json::from_str(trimmed) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = %e, "parse error");
                    write_response(writer, &JsonRpcResponse::error(None, JsonRpcError::parse_error()))
                        .await?;
                    continue;
                }
            };

            let id = readable_id(&value);
            let req: JsonRpcRequest = match serde_json::from_value(value) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(error = %e, "invalid request");
                    write_response(writer, &JsonRpcResponse::error(id, JsonRpcError::invalid_request()))
                        .await?;
                    continue;
                }
            };

            if req.jsonrpc != "2.0" {
                write_response(
                    writer,
                    &JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request()),
                )
                .await?;
                continue;
            }

            // Initialization gate: only `initialize` is allowed before handshake completes
            if !self.initialized && req.method != "initialize" {
                if req.is_notification() {
                    continue;
                }
                write_response(
                    writer,
                    &JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_request_with("Server not initialized"),
                    ),
                )
                .await?;
                continue;
            }

            if let Some(resp) = handlers::dispatch(&req, &self.config).await {
                write_response(writer, &resp).await?;
            }

            // An `initialize` notification gets no answer, so it cannot complete the handshake.
            if req.method == "initialize" && !req.is_notification() {
                self.initialized = true;
            }
        }

        Ok(())
    }
}

/// Drive `session` until it finishes or `interrupt` fires.
///
/// If the interrupt source itself fails (no signal handler could be
/// installed), the failure is logged and the session keeps running until
/// its input closes.
pub async fn run_until_interrupted<S, I>(session: S, interrupt: I) -> Result<Exit, ServerError>
where
    S: Future<Output = Result<(), ServerError>>,
    I: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(session);

    tokio::select! {
        result = &mut session => result.map(|()| Exit::InputClosed),
        signal = interrupt => match signal {
            Ok(()) => Ok(Exit::Interrupted),
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for Ctrl-C, serving until input closes");
                session.await.map(|()| Exit::InputClosed)
            }
        },
    }
}

/// Read one line of at most `limit` bytes (terminator excluded) into `buf`.
///
/// Never buffers more than `limit + 1` bytes; the remainder of an oversized
/// line is skipped without being stored.
async fn read_frame<R>(reader: &mut R, buf: &mut Vec<u8>, limit: usize) -> std::io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    let cap = (limit as u64).saturating_add(1);
    let n = (&mut *reader).take(cap).read_until(b'\n', buf).await?;
    if n == 0 {
        return Ok(Frame::Eof);
    }

    if buf.last() == Some(&b'\n') || n <= limit {
        return Ok(Frame::Line);
    }

    let rest = discard_line(reader).await?;
    buf.clear();
    Ok(Frame::Oversized(n + rest))
}

/// Consume input up to and including the next newline (or EOF).
async fn discard_line<R>(reader: &mut R) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut discarded = 0;
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(discarded);
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(discarded + i + 1);
            }
            None => {
                let len = available.len();
                reader.consume(len);
                discarded += len;
            }
        }
    }
}

/// The request id, if the message carries one of a valid type.
fn readable_id(value: &Value) -> Option<RpcId> {
    value
        .get("id")
        .and_then(|id| serde_json::from_value(id.clone()).ok())
}

async fn write_response<W>(writer: &mut W, resp: &JsonRpcResponse) -> Result<(), ServerError>
where
    W: AsyncWrite + Unpin,
{
    let out = serde_json::to_string(resp)?;
    writer.write_all(out.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
