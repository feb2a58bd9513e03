//! WebSocket transport for the client.
//!
//! Provides [`ConnectedClient`] which handles WebSocket I/O for text frames.
//! This is a thin layer that just sends/receives frames - protocol logic
//! remains in the Sans-IO [`crate::StreamClient`].
//!
//! Opening never blocks the caller: the handshake runs in the connection
//! task, which reports [`StreamEvent::Opened`] when it completes. Every way
//! a socket can end (failed handshake, close frame, read or write error,
//! stream end) is reported as a single [`StreamEvent::Closed`].

use std::{sync::Once, time::Duration};

use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{
    net::TcpStream,
    sync::mpsc::{self, error::TryRecvError},
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use crate::StreamEvent;

/// Default time allowed for the TCP/TLS/WebSocket handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default capacity of the frame channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Handshake failed or timed out.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Open socket ended.
    #[error("stream error: {0}")]
    Stream(String),
}

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Upper bound on opening a socket. Not a retry delay.
    pub connect_timeout: Duration,
    /// Capacity of the inbound and outbound frame channels.
    pub channel_capacity: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Handle to a WebSocket, open or still opening.
///
/// Frames are sent/received via the channels, and an internal task handles
/// the handshake and the socket I/O. Dropping the handle stops the task and
/// closes the socket.
pub struct ConnectedClient {
    /// Send text frames to the server.
    pub to_server: mpsc::Sender<String>,
    /// Receive the open notification, frames, and the final close.
    pub from_server: mpsc::Receiver<StreamEvent>,
    /// Abort handle to stop the connection task.
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectedClient {
    /// Stop the connection.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }

    /// Next inbound event without waiting. `None` if nothing is pending.
    ///
    /// A finished connection task reads as `Closed`, so a socket that dies
    /// without a goodbye is still reported.
    pub fn try_recv(&mut self) -> Option<StreamEvent> {
        match self.from_server.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(StreamEvent::Closed { reason: "connection task ended".to_string() })
            },
        }
    }
}

impl Drop for ConnectedClient {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start opening a WebSocket to `url` with default settings.
///
/// Returns at once. The outcome arrives on
/// [`from_server`](ConnectedClient::from_server): [`StreamEvent::Opened`]
/// once the handshake completes, or [`StreamEvent::Closed`] if it fails.
pub fn connect(url: &str) -> ConnectedClient {
    connect_with_config(url, &TransportConfig::default())
}

/// Start opening a WebSocket to `url`.
///
/// The handshake runs in the connection task, bounded by
/// `config.connect_timeout`. Frames queued on `to_server` before the socket
/// is open are sent once it is.
///
/// Must be called within a tokio runtime.
pub fn connect_with_config(url: &str, config: &TransportConfig) -> ConnectedClient {
    install_crypto_provider();

    let (to_server_tx, to_server_rx) = mpsc::channel::<String>(config.channel_capacity);
    let (from_server_tx, from_server_rx) = mpsc::channel::<StreamEvent>(config.channel_capacity);

    let handle = tokio::spawn(run_connection(
        url.to_string(),
        config.connect_timeout,
        to_server_rx,
        from_server_tx,
    ));

    ConnectedClient {
        to_server: to_server_tx,
        from_server: from_server_rx,
        abort_handle: handle.abort_handle(),
    }
}

/// Perform the TCP/TLS/WebSocket handshake.
async fn open(url: &str, connect_timeout: Duration) -> Result<Socket, TransportError> {
    let (socket, _response) = tokio::time::timeout(connect_timeout, connect_async(url))
        .await
        .map_err(|_| TransportError::Connection(format!("timed out after {connect_timeout:?}")))?
        .map_err(|e| TransportError::Connection(e.to_string()))?;
    Ok(socket)
}

/// Open the socket, then bridge between channels and the socket.
///
/// Always ends with exactly one `Closed`, unless the handle was dropped.
async fn run_connection(
    url: String,
    connect_timeout: Duration,
    mut to_server: mpsc::Receiver<String>,
    from_server: mpsc::Sender<StreamEvent>,
) {
    let socket = match open(&url, connect_timeout).await {
        Ok(socket) => socket,
        Err(e) => {
            tracing::debug!(%url, error = %e, "websocket handshake failed");
            let _ = from_server.send(StreamEvent::Closed { reason: e.to_string() }).await;
            return;
        },
    };

    if from_server.send(StreamEvent::Opened).await.is_err() {
        return;
    }

    let (mut sink, mut stream) = socket.split();

    let error = loop {
        tokio::select! {
            outgoing = to_server.recv() => match outgoing {
                Some(text) => {
                    if let Err(e) = sink.send(Message::Text(text.into())).await {
                        break TransportError::Stream(format!("write failed: {e}"));
                    }
                },
                None => {
                    let _ = sink.send(Message::Close(None)).await;
                    break TransportError::Stream("client hung up".to_string());
                },
            },

            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    let event = StreamEvent::FrameReceived(text.to_string());
                    if from_server.send(event).await.is_err() {
                        // Handle dropped, nobody left to tell.
                        return;
                    }
                },
                Some(Ok(Message::Close(frame))) => {
                    break TransportError::Stream(match frame {
                        Some(frame) => format!(
                            "closed by server ({}): {}",
                            u16::from(frame.code),
                            frame.reason.as_str()
                        ),
                        None => "closed by server".to_string(),
                    });
                },
                Some(Ok(Message::Binary(bytes))) => {
                    tracing::trace!(len = bytes.len(), "ignoring binary frame");
                },
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {},
                Some(Err(e)) => break TransportError::Stream(format!("read failed: {e}")),
                None => break TransportError::Stream("stream ended".to_string()),
            },
        }
    };

    let reason = error.to_string();
    tracing::debug!(%url, %reason, "websocket closed");
    let _ = from_server.send(StreamEvent::Closed { reason }).await;
}

/// Select the ring provider for `wss://` handshakes.
fn install_crypto_provider() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        // Err means another provider is already installed, which is fine.
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
