//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`hitfeed_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Clones share state: a test keeps one handle to script the socket and
//! inspect what was sent while the runtime owns another.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use hitfeed_app::{App, AppEvent, Driver, KeyInput};
use hitfeed_client::StreamEvent;

use crate::invariants::{AppSnapshot, InvariantRegistry};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// Shared state for event injection.
///
/// This allows injection from outside async contexts.
#[derive(Debug, Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    incoming: VecDeque<StreamEvent>,
    outgoing: Vec<String>,
    connect_urls: Vec<String>,
    refuse_connects: usize,
    hold_handshakes: bool,
    fail_next_send: bool,
    connected: bool,
    renders: usize,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] trait so the same [`hitfeed_app::Runtime`]
/// orchestration code runs in both production TUI and simulation tests.
#[derive(Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inject an `AppEvent` for processing.
    pub fn inject_event(&self, event: AppEvent) {
        self.lock().pending_events.push_back(event);
    }

    /// Inject a key press.
    pub fn inject_key(&self, key: KeyInput) {
        self.inject_event(AppEvent::Key(key));
    }

    /// Inject typed text, one key press per character.
    pub fn inject_text(&self, text: &str) {
        let mut state = self.lock();
        state.pending_events.extend(text.chars().map(|c| AppEvent::Key(KeyInput::Char(c))));
    }

    /// Inject a text frame from the server.
    pub fn inject_frame(&self, text: impl Into<String>) {
        self.lock().incoming.push_back(StreamEvent::FrameReceived(text.into()));
    }

    /// Close the socket from the server side.
    ///
    /// Frames injected before the close are still delivered first.
    pub fn inject_close(&self, reason: impl Into<String>) {
        self.lock().incoming.push_back(StreamEvent::Closed { reason: reason.into() });
    }

    /// Refuse the next `count` connect attempts.
    pub fn refuse_connects(&self, count: usize) {
        self.lock().refuse_connects = count;
    }

    /// Leave handshakes of later connects pending until
    /// [`complete_handshake`](Self::complete_handshake) is called.
    ///
    /// By default a connect that is not refused opens at once.
    pub fn hold_handshakes(&self) {
        self.lock().hold_handshakes = true;
    }

    /// Finish the pending handshake and open later sockets at once again.
    ///
    /// The open is reported ahead of any frames already injected.
    pub fn complete_handshake(&self) {
        let mut state = self.lock();
        state.hold_handshakes = false;
        state.incoming.push_front(StreamEvent::Opened);
    }

    /// Fail the next send.
    pub fn fail_next_send(&self) {
        self.lock().fail_next_send = true;
    }

    /// Take all captured outgoing frames.
    pub fn take_outgoing(&self) -> Vec<String> {
        std::mem::take(&mut self.lock().outgoing)
    }

    /// URLs of every connect attempt so far, refused ones included.
    pub fn connect_urls(&self) -> Vec<String> {
        self.lock().connect_urls.clone()
    }

    /// Number of connect attempts so far.
    pub fn connect_count(&self) -> usize {
        self.lock().connect_urls.len()
    }

    /// Number of renders so far.
    pub fn render_count(&self) -> usize {
        self.lock().renders
    }

    /// Check if `stop` was called.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    /// Check if there are pending events to process.
    pub fn has_pending(&self) -> bool {
        let state = self.lock();
        !state.pending_events.is_empty() || !state.incoming.is_empty()
    }

    /// Check invariants against App state.
    pub fn check_invariants(&self, app: &App, context: &str) {
        if let Some(ref registry) = self.invariants {
            registry.assert_all(&AppSnapshot::from_app(app), context);
        }
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        Ok(self.lock().pending_events.pop_front())
    }

    async fn connect(&mut self, url: &str) -> Result<(), Self::Error> {
        let mut state = self.lock();
        state.connect_urls.push(url.to_string());

        // The previous socket goes away either way.
        state.connected = false;
        state.incoming.clear();

        if state.refuse_connects > 0 {
            state.refuse_connects -= 1;
            return Err(SimDriverError(format!("connection refused: {url}")));
        }

        state.connected = true;
        if !state.hold_handshakes {
            state.incoming.push_back(StreamEvent::Opened);
        }
        Ok(())
    }

    async fn send_text(&mut self, text: String) -> Result<(), Self::Error> {
        let mut state = self.lock();
        if !state.connected {
            return Err(SimDriverError("not connected".to_string()));
        }
        if std::mem::take(&mut state.fail_next_send) {
            state.connected = false;
            return Err(SimDriverError("broken pipe".to_string()));
        }
        state.outgoing.push(text);
        Ok(())
    }

    async fn recv_event(&mut self) -> Option<StreamEvent> {
        let mut state = self.lock();
        if !state.connected {
            return None;
        }

        let event = state.incoming.pop_front();
        if matches!(event, Some(StreamEvent::Closed { .. })) {
            state.connected = false;
        }
        event
    }

    fn is_connected(&self) -> bool {
        self.lock().connected
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.lock().renders += 1;
        self.check_invariants(app, "after render");
        Ok(())
    }

    fn stop(&mut self) {
        let mut state = self.lock();
        state.stopped = true;
        state.connected = false;
    }
}
