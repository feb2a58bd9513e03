//! Error types for origin parsing and wire encoding.

use thiserror::Error;

/// Errors raised while parsing a service origin.
///
/// These are configuration errors: they are reported once at startup and
/// never occur while the stream is running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// Scheme is missing or not `http`/`https`
    #[error("unsupported scheme in origin {0:?}, expected http:// or https://")]
    UnsupportedScheme(String),

    /// Nothing between the scheme and the port
    #[error("origin has no host")]
    MissingHost,

    /// Host carries userinfo or an unbracketed `:`
    #[error("invalid host {0:?}")]
    InvalidHost(String),

    /// Port is empty, not a number, or out of range
    #[error("invalid port {0:?}")]
    InvalidPort(String),

    /// Origin carries a path, query, or fragment
    #[error("origin must not contain a path, query, or fragment: {0:?}")]
    UnexpectedPath(String),
}

/// Errors raised while encoding stream commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// JSON serialization failed
    #[error("command encode failed: {0}")]
    Encode(String),
}
