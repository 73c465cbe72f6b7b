#![cfg(feature = "std")]

//! JSON-lines TCP front end.
//!
//! Every line received is one [`Request`](crate::protocol::Request); every
//! reply is one line of JSON. Connections run concurrently and may address
//! any session; the engine serializes work per session.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};

use crate::common::GameError;
use crate::engine::GameEngine;
use crate::protocol::error_value;
use crate::session::SessionStore;

/// Maximum accepted request line, in bytes.
const MAX_LINE_LEN: usize = 64 * 1024;

/// Bind `addr` and serve until the listener fails.
pub async fn run<A, S>(addr: A, engine: Arc<GameEngine<S>>) -> anyhow::Result<()>
where
    A: ToSocketAddrs,
    S: SessionStore + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    log::info!("listening on {}", listener.local_addr()?);
    serve(listener, engine).await
}

/// Accept connections on `listener` forever.
pub async fn serve<S>(listener: TcpListener, engine: Arc<GameEngine<S>>) -> anyhow::Result<()>
where
    S: SessionStore + 'static,
{
    loop {
        let (stream, peer) = listener.accept().await?;
        log::debug!("connection from {}", peer);
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, engine).await {
                log::warn!("connection {} ended with error: {}", peer, e);
            }
        });
    }
}

/// Answer request lines on `stream` until the peer closes it.
///
/// A line longer than `MAX_LINE_LEN` is answered with an error and the
/// connection is closed; at most `MAX_LINE_LEN + 1` bytes of it are read.
pub async fn handle_connection<S>(stream: TcpStream, engine: Arc<GameEngine<S>>) -> anyhow::Result<()>
where
    S: SessionStore,
{
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = (&mut reader)
            .take(MAX_LINE_LEN as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if n == 0 {
            return Ok(());
        }
        if buf.len() > MAX_LINE_LEN && buf.last() != Some(&b'\n') {
            log::warn!("closing connection: request line over {} bytes", MAX_LINE_LEN);
            let reply =
                error_value(&GameError::MalformedRequestBody("request too large".to_string()));
            send_line(&mut writer, &reply.to_string()).await?;
            return Err(anyhow::anyhow!(
                "request line exceeds {} bytes",
                MAX_LINE_LEN
            ));
        }

        let text = String::from_utf8_lossy(&buf);
        let line = text.trim();
        if line.is_empty() {
            continue;
        }
        let reply = engine.handle_line(line);
        send_line(&mut writer, &reply).await?;
    }
}

async fn send_line(writer: &mut OwnedWriteHalf, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
