//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use hitfeed_client::StreamEvent;

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in production TUI and simulation.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events, tokio-tungstenite for the
///   WebSocket
/// - **Simulation**: Scripted events and frames, captured outgoing frames
///
/// # Errors
///
/// [`Error`](Driver::Error) from `poll_event` and `render` is fatal. From
/// `connect` and `send_text` it only ends the current socket; the runtime
/// reports it to the stream client as a close.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns an available event or `None` if no events are ready.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Start opening a socket to `url`, replacing any previous one.
    ///
    /// Must not wait for the handshake. The outcome is reported later by
    /// [`recv_event`](Driver::recv_event): [`StreamEvent::Opened`] once the
    /// socket is open, or [`StreamEvent::Closed`] if opening failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the attempt cannot even be started.
    fn connect(&mut self, url: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Send a text frame on the open socket.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no socket or the send fails.
    fn send_text(&mut self, text: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Receive the next pending event from the socket without waiting.
    ///
    /// Returns `None` if nothing is pending. A socket that died yields
    /// [`StreamEvent::Closed`].
    fn recv_event(&mut self) -> impl Future<Output = Option<StreamEvent>> + Send;

    /// Check if a socket is installed, open or still opening.
    fn is_connected(&self) -> bool;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Stop the connection and clean up resources.
    fn stop(&mut self);
}
