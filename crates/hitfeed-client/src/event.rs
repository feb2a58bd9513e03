//! Client events and actions.

use crate::StreamState;

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Opening sockets when asked to and reporting the outcome
/// - Forwarding inbound text frames in the order the transport delivered them
/// - Reporting every close, whatever its cause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Socket requested by [`StreamAction::Connect`] is open.
    Opened,

    /// Text frame received from the server.
    FrameReceived(String),

    /// Socket closed, failed to open, or failed to send.
    ///
    /// Network errors, server restarts, and clean closes all land here.
    Closed {
        /// Human-readable cause, for logging only.
        reason: String,
    },
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamAction {
    /// Open a new socket to this URL, replacing any previous one.
    Connect {
        /// Stream endpoint (`ws://` or `wss://`).
        url: String,
    },

    /// Send this text frame on the open socket.
    Send(String),

    /// Hand an accepted activity message to the feed.
    Deliver(String),

    /// Connection state changed.
    StateChanged {
        /// New state.
        state: StreamState,
        /// Connection instance the state belongs to (1-based).
        attempt: u64,
    },
}
