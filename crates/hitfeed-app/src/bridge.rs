//! Stream-to-Application translation layer.
//!
//! The [`Bridge`] wraps the low-level [`hitfeed_client::StreamClient`] and
//! adapts it to the high-level application lifecycle.
//!
//! # Responsibilities
//!
//! - Feeds transport events into the client.
//! - Accumulates outgoing text frames and the pending connect target for the
//!   driver to execute in the next I/O cycle.
//! - Stamps delivered activity with the local capture time and converts
//!   client results back into [`crate::AppEvent`]s to update the UI.
//! - Keeps protocol violations out of the UI: they are logged and dropped.

use hitfeed_client::{ClientError, StreamAction, StreamClient, StreamEvent, StreamState};
use hitfeed_core::{Origin, env::Environment};

use crate::AppEvent;

/// Bridge between App and StreamClient protocol logic.
///
/// Generic over Environment to support both production and simulation.
pub struct Bridge<E: Environment> {
    env: E,
    client: StreamClient,
    outgoing: Vec<String>,
    connect: Option<String>,
}

impl<E: Environment> Bridge<E> {
    /// Create a new Bridge for the stream endpoint of `origin`.
    pub fn new(env: E, origin: &Origin) -> Self {
        Self { env, client: StreamClient::new(origin), outgoing: Vec::new(), connect: None }
    }

    /// Start the first connection instance.
    pub fn start(&mut self) -> Vec<AppEvent> {
        let actions = self.client.start();
        self.process_client_actions(actions)
    }

    /// Handle an event from the transport.
    pub fn handle_stream_event(&mut self, event: StreamEvent) -> Vec<AppEvent> {
        let result = self.client.handle(event);
        self.handle_client_result(result)
    }

    /// Take pending outgoing frames.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }

    /// Take the pending connect target. `None` if no socket is wanted.
    pub fn take_connect(&mut self) -> Option<String> {
        self.connect.take()
    }

    /// Check if a socket has been requested but not yet taken.
    pub fn connect_pending(&self) -> bool {
        self.connect.is_some()
    }

    /// Current stream state.
    pub fn state(&self) -> StreamState {
        self.client.state()
    }

    /// Underlying stream client.
    pub fn client(&self) -> &StreamClient {
        &self.client
    }

    fn handle_client_result(
        &mut self,
        result: Result<Vec<StreamAction>, ClientError>,
    ) -> Vec<AppEvent> {
        match result {
            Ok(actions) => self.process_client_actions(actions),
            Err(e) => {
                tracing::warn!(error = %e, "dropping stream event");
                vec![]
            },
        }
    }

    fn process_client_actions(&mut self, actions: Vec<StreamAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                StreamAction::Connect { url } => {
                    // Frames queued for the previous socket die with it.
                    self.outgoing.clear();
                    self.connect = Some(url);
                },
                StreamAction::Send(text) => {
                    self.outgoing.push(text);
                },
                StreamAction::Deliver(text) => {
                    let received_at = self.env.local_time();
                    events.push(AppEvent::ActivityReceived { text, received_at });
                },
                StreamAction::StateChanged { state, attempt } => {
                    tracing::debug!(?state, attempt, "stream state changed");
                    events.push(AppEvent::StreamStateChanged { state, attempt });
                },
            }
        }

        events
    }
}
