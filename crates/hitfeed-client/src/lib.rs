//! Client
//!
//! Action-based event stream client for the hit counter service. Owns the
//! connection lifecycle: subscription handshake, acknowledgment and noise
//! filtering, and the unconditional reconnect policy.
//!
//! # Architecture
//!
//! The client follows the Sans-IO pattern. It receives events
//! ([`StreamEvent`]), processes them through pure state machine logic, and
//! returns actions ([`StreamAction`]) for the caller to execute. Sockets,
//! timers, and rendering all live with the caller.
//!
//! # Components
//!
//! - [`StreamClient`]: Connection lifecycle state machine
//! - [`StreamEvent`]: Events fed into the client
//! - [`StreamAction`]: Actions produced by the client
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::ConnectedClient`]: Handle to a WebSocket
//! - [`transport::connect`]: Start opening a WebSocket to the stream endpoint

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod error;
mod event;

#[cfg(feature = "transport")]
pub mod transport;

pub use client::{StreamClient, StreamState};
pub use error::ClientError;
pub use event::{StreamAction, StreamEvent};
pub use hitfeed_core::{Origin, protocol::MAX_NOISE_LEN};
