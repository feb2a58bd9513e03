//! Client error types.

use hitfeed_core::ProtocolError;
use thiserror::Error;

use crate::StreamState;

/// Errors from stream client operations.
///
/// None of these are fatal: the caller logs them and the stream carries on.
/// A socket problem is never an error here, it is a
/// [`crate::StreamEvent::Closed`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Event is not valid in the current state.
    #[error("invalid state transition: cannot {operation} from {state:?}")]
    InvalidState {
        /// Current state when error occurred
        state: StreamState,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Substantive frame arrived while no socket was open.
    #[error("unexpected frame in state {state:?}")]
    UnexpectedFrame {
        /// Current state when frame was received
        state: StreamState,
    },

    /// Command encoding failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}
