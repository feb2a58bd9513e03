//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The event stream uses a
//! tokio-tungstenite WebSocket.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use hitfeed_app::{App, AppEvent, Driver, KeyInput};
use hitfeed_client::{
    StreamEvent,
    transport::{self, ConnectedClient},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::time::Duration;

use crate::ui;

/// Longest wait for input before the runtime gets a chance to tick.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Send attempted without a socket.
    #[error("not connected")]
    NotConnected,

    /// Channel send error.
    #[error("channel send error")]
    ChannelSend,

    /// Log subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the WebSocket.
/// Holds at most one socket; `connect` replaces it. The handshake runs in
/// the background, so input keeps flowing while a socket opens.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    connection: Option<ConnectedClient>,
    /// Inbound event that woke `poll_event`, handed out first by
    /// `recv_event`.
    stashed: Option<StreamEvent>,
}

impl TerminalDriver {
    /// Create a new terminal driver, switching the terminal to raw mode and
    /// the alternate screen.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, connection: None, stashed: None })
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab | KeyCode::BackTab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    /// Forget the socket if `event` ended it.
    fn observe(&mut self, event: &StreamEvent) {
        if matches!(event, StreamEvent::Closed { .. }) {
            self.connection = None;
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let Self { event_stream, connection, stashed, .. } = self;

        let listen = stashed.is_none();
        let inbound = async {
            match connection.as_mut() {
                Some(conn) if listen => conn.from_server.recv().await,
                _ => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        Ok(Self::convert_key(key_event.code).map(AppEvent::Key))
                    },
                    Some(Ok(Event::Resize(cols, rows))) => Ok(Some(AppEvent::Resize(cols, rows))),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(None),
                }
            }

            // Socket activity (open, frames, close) wakes the loop at once
            event = inbound => {
                *stashed = Some(event.unwrap_or_else(|| StreamEvent::Closed {
                    reason: "connection task ended".to_string(),
                }));
                Ok(None)
            }

            // Tick timeout
            () = tokio::time::sleep(TICK_INTERVAL) => {
                Ok(Some(AppEvent::Tick))
            }
        }
    }

    async fn connect(&mut self, url: &str) -> Result<(), Self::Error> {
        self.stop();
        self.stashed = None;

        tracing::debug!(%url, "opening socket");
        self.connection = Some(transport::connect(url));
        Ok(())
    }

    async fn send_text(&mut self, text: String) -> Result<(), Self::Error> {
        let conn = self.connection.as_ref().ok_or(TerminalError::NotConnected)?;
        conn.to_server.send(text).await.map_err(|_| TerminalError::ChannelSend)
    }

    async fn recv_event(&mut self) -> Option<StreamEvent> {
        let event = match self.stashed.take() {
            Some(event) => Some(event),
            None => self.connection.as_mut().and_then(ConnectedClient::try_recv),
        };

        if let Some(ref event) = event {
            self.observe(event);
        }
        event
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(conn) = self.connection.take() {
            conn.stop();
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
