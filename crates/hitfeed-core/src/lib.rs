//! Core types for the hitfeed client.
//!
//! Everything here is pure: origin parsing and endpoint derivation, the JSON
//! commands exchanged over the event stream, and the [`env::Environment`]
//! seam that keeps wall-clock reads out of protocol logic.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod endpoint;
pub mod env;
pub mod error;
pub mod protocol;

pub use endpoint::{Origin, Scheme};
pub use env::{Environment, SystemEnv};
pub use error::{EndpointError, ProtocolError};
pub use protocol::Command;
