//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize) and system ticks.
//! - Stream notifications translated by the [`crate::Bridge`].

use chrono::NaiveTime;
use hitfeed_client::StreamState;

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Stream connection state changed.
    StreamStateChanged {
        /// New stream state.
        state: StreamState,
        /// Connection instance (1-based).
        attempt: u64,
    },

    /// Activity message accepted by the stream client.
    ActivityReceived {
        /// Raw message payload.
        text: String,
        /// Local capture time.
        received_at: NaiveTime,
    },
}
