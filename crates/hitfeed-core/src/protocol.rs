//! Commands exchanged over the event stream.
//!
//! The stream is text-only. The client sends one JSON command per frame; the
//! server answers with free-form text frames:
//!
//! ```text
//! client ── {"name":"subscribe","payload":"all"} ──> server
//! client <── "successfully subscribed to all" ─────── server   (acknowledgment)
//! client <── "<section key>" ──────────────────────── server   (one per hit)
//! ```
//!
//! Frames of [`MAX_NOISE_LEN`] UTF-16 code units or fewer carry no information
//! (the server greets every socket with an empty frame) and are dropped
//! before any state is consulted.

use serde::Serialize;

use crate::error::ProtocolError;

/// Command name for subscribing to activity.
pub const SUBSCRIBE: &str = "subscribe";

/// Topic covering every counter on the server.
pub const ALL_TOPICS: &str = "all";

/// Frames with at most this many UTF-16 code units are keepalive noise.
pub const MAX_NOISE_LEN: usize = 3;

/// A command sent to the server as a single JSON text frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    /// Command name
    pub name: String,
    /// Command argument
    pub payload: String,
}

impl Command {
    /// Subscribe to a topic.
    pub fn subscribe(topic: impl Into<String>) -> Self {
        Self { name: SUBSCRIBE.to_string(), payload: topic.into() }
    }

    /// Subscribe to activity on every counter.
    pub fn subscribe_all() -> Self {
        Self::subscribe(ALL_TOPICS)
    }

    /// Serialize to the wire form.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::Encode` if JSON serialization fails
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|e| ProtocolError::Encode(e.to_string()))
    }
}

/// Whether a text frame is keepalive noise (at most [`MAX_NOISE_LEN`]
/// long).
///
/// Length is measured in UTF-16 code units, the way the service's web page
/// measures it: a character outside the Basic Multilingual Plane counts
/// twice.
pub fn is_noise(text: &str) -> bool {
    text.encode_utf16().nth(MAX_NOISE_LEN).is_none()
}
