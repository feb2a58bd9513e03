//! Stream client state machine.
//!
//! Manages the lifecycle of the event stream: open, subscribe, swallow the
//! acknowledgment, deliver activity, and start over on any close. Uses the
//! action pattern: methods take events and return actions for the driver to
//! execute, so the state machine stays pure.
//!
//! # State Machine
//!
//! ```text
//!                ┌────────────┐  Opened   ┌──────┐  first frame  ┌────────────┐
//!   start() ───> │ Connecting │─────────> │ Open │─────────────> │ Subscribed │
//!                └────────────┘  (send    └──────┘  (ack, drop)  └────────────┘
//!                      ↑        subscribe)    │                        │
//!                      │                      │ Closed                 │ Closed
//!                      │     start()     ┌────────┐                    │
//!                      └──────────────── │ Closed │ <──────────────────┘
//!                                        └────────┘
//! ```
//!
//! `Closed` is terminal for one connection instance only. Entering it always
//! starts the next instance, so the client as a whole never stops.

use hitfeed_core::{
    Command, Origin,
    protocol::{self, ALL_TOPICS},
};

use crate::{ClientError, StreamAction, StreamEvent};

/// Connection state of the current socket instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Socket requested, not yet open
    Connecting,
    /// Socket open, subscribe sent, waiting for the acknowledgment
    Open,
    /// Acknowledgment received, activity flows to the feed
    Subscribed,
    /// Socket gone; a replacement is started immediately
    Closed,
}

/// Event stream client.
///
/// Owns the state of exactly one socket instance at a time. The caller opens
/// and tears down sockets; this type decides when and what to send.
#[derive(Debug, Clone)]
pub struct StreamClient {
    /// Current state
    state: StreamState,
    /// Stream endpoint URL
    url: String,
    /// Subscription topic
    topic: String,
    /// Connection instances started so far
    attempt: u64,
    /// Frames delivered to the feed since construction
    delivered: u64,
}

impl StreamClient {
    /// Create a client for the stream endpoint of `origin`, subscribing to
    /// all activity.
    ///
    /// The client starts in [`StreamState::Closed`]; call
    /// [`start`](Self::start) to request the first socket.
    pub fn new(origin: &Origin) -> Self {
        Self {
            state: StreamState::Closed,
            url: origin.stream_url(),
            topic: ALL_TOPICS.to_string(),
            attempt: 0,
            delivered: 0,
        }
    }

    /// Current connection state.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Stream endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connection instances started so far (0 before the first `start`).
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Frames delivered to the feed since construction.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Start a new connection instance.
    ///
    /// Valid from any state. Returns the state change and a `Connect` action;
    /// the caller must replace whatever socket it still holds.
    pub fn start(&mut self) -> Vec<StreamAction> {
        self.attempt = self.attempt.saturating_add(1);
        self.state = StreamState::Connecting;

        vec![self.state_changed(), StreamAction::Connect { url: self.url.clone() }]
    }

    /// Process an event and return resulting actions.
    ///
    /// # Errors
    ///
    /// - `ClientError::InvalidState` if `Opened` arrives outside `Connecting`
    /// - `ClientError::UnexpectedFrame` if a substantive frame arrives while no
    ///   socket is open
    /// - `ClientError::Protocol` if the subscribe command cannot be encoded
    pub fn handle(&mut self, event: StreamEvent) -> Result<Vec<StreamAction>, ClientError> {
        match event {
            StreamEvent::Opened => self.handle_opened(),
            StreamEvent::FrameReceived(text) => self.handle_frame(text),
            StreamEvent::Closed { reason } => Ok(self.handle_closed(&reason)),
        }
    }

    fn handle_opened(&mut self) -> Result<Vec<StreamAction>, ClientError> {
        if self.state != StreamState::Connecting {
            return Err(ClientError::InvalidState { state: self.state, operation: "open" });
        }

        let subscribe = Command::subscribe(self.topic.clone()).to_json()?;
        self.state = StreamState::Open;

        Ok(vec![self.state_changed(), StreamAction::Send(subscribe)])
    }

    fn handle_frame(&mut self, text: String) -> Result<Vec<StreamAction>, ClientError> {
        if protocol::is_noise(&text) {
            tracing::trace!(len = text.len(), "dropping noise frame");
            return Ok(vec![]);
        }

        match self.state {
            StreamState::Open => {
                // First substantive frame after open is the acknowledgment,
                // whatever it says.
                tracing::debug!(ack = %text, attempt = self.attempt, "subscription acknowledged");
                self.state = StreamState::Subscribed;
                Ok(vec![self.state_changed()])
            },
            StreamState::Subscribed => {
                self.delivered = self.delivered.saturating_add(1);
                Ok(vec![StreamAction::Deliver(text)])
            },
            state @ (StreamState::Connecting | StreamState::Closed) => {
                Err(ClientError::UnexpectedFrame { state })
            },
        }
    }

    fn handle_closed(&mut self, reason: &str) -> Vec<StreamAction> {
        tracing::debug!(%reason, attempt = self.attempt, state = ?self.state, "stream closed");

        self.state = StreamState::Closed;
        let mut actions = vec![self.state_changed()];
        actions.extend(self.start());
        actions
    }

    fn state_changed(&self) -> StreamAction {
        StreamAction::StateChanged { state: self.state, attempt: self.attempt }
    }
}
