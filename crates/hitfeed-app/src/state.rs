//! Observable application state types.
//!
//! [`ConnectionStatus`] is the "View Model" of the stream connection: the
//! subset of [`StreamState`] the status bar needs, without exposing the
//! client itself.

use hitfeed_client::StreamState;

/// Connection status as shown to the user.
///
/// Failures never show up here as errors. A dropped socket is only visible
/// as a short return to `Connecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No connection requested yet.
    Idle,
    /// Socket being opened, or reopened after a close.
    Connecting,
    /// Socket open, waiting for the subscription acknowledgment.
    Subscribing,
    /// Subscribed, activity is flowing.
    Live,
}

impl ConnectionStatus {
    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Connecting => "Connecting...",
            Self::Subscribing => "Subscribing...",
            Self::Live => "Live",
        }
    }
}

impl From<StreamState> for ConnectionStatus {
    fn from(state: StreamState) -> Self {
        match state {
            // Closed is immediately followed by a new attempt.
            StreamState::Connecting | StreamState::Closed => Self::Connecting,
            StreamState::Open => Self::Subscribing,
            StreamState::Subscribed => Self::Live,
        }
    }
}
