//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: Protocol bridge to the stream client
//! - [`Driver`]: Platform-specific I/O
//!
//! # Reconnect procedure
//!
//! There is one close handler: every way a socket can end is fed to the
//! stream client as [`StreamEvent::Closed`], which requests a new socket.
//! Each cycle starts at most one connect attempt. Handshakes complete in the
//! driver, so a slow or silent server never holds up input handling, and
//! the retry procedure has no recursion.

use hitfeed_client::StreamEvent;
use hitfeed_core::{Origin, env::Environment};

use crate::{App, AppAction, AppEvent, Bridge, Driver};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment providing the wall clock
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    app: App,
    bridge: Bridge<E>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a new runtime for the service at `origin`.
    pub fn new(driver: D, env: E, origin: Origin) -> Self {
        let bridge = Bridge::new(env, &origin);
        let app = App::new(origin);
        Self { driver, app, bridge }
    }

    /// Run the main event loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters a fatal I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.start()?;

        loop {
            let should_quit = self.step().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Render once and request the first socket.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn start(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        let events = self.bridge.start();
        self.process_bridge_events(events)?;
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// 1. Apply at most one input event
    /// 2. Drain inbound socket events in transport order
    /// 3. Start the pending connect, if any, and drain again so an open or
    ///    failure the driver already knows about is handled this cycle
    ///
    /// Connecting never waits for a handshake, so input is handled while a
    /// socket opens.
    ///
    /// Returns `true` if the application should quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters a fatal I/O error.
    pub async fn step(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_event().await? {
            let actions = self.app.handle(event);
            if self.process_actions(actions)? {
                return Ok(true);
            }
        }

        let mut attempted = false;
        loop {
            while self.driver.is_connected()
                && !self.bridge.connect_pending()
                && let Some(event) = self.driver.recv_event().await
            {
                if self.feed_stream_event(event).await? {
                    return Ok(true);
                }
            }

            if attempted {
                break;
            }
            let Some(url) = self.bridge.take_connect() else {
                break;
            };
            attempted = true;

            if let Err(e) = self.driver.connect(&url).await {
                tracing::debug!(%url, error = %e, "connect failed");
                let closed = StreamEvent::Closed { reason: e.to_string() };
                if self.feed_stream_event(closed).await? {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Feed a socket event through the Bridge into the App, then flush
    /// outgoing frames. A failed send is fed back as a close.
    async fn feed_stream_event(&mut self, event: StreamEvent) -> Result<bool, D::Error> {
        let mut next = Some(event);

        while let Some(event) = next.take() {
            let events = self.bridge.handle_stream_event(event);
            next = self.send_outgoing_frames().await;
            if self.process_bridge_events(events)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Send all pending outgoing frames.
    ///
    /// Returns the resulting close if a send failed.
    async fn send_outgoing_frames(&mut self) -> Option<StreamEvent> {
        for text in self.bridge.take_outgoing() {
            if let Err(e) = self.driver.send_text(text).await {
                tracing::debug!(error = %e, "send failed");
                return Some(StreamEvent::Closed { reason: e.to_string() });
            }
        }
        None
    }

    /// Process events from Bridge back to App.
    fn process_bridge_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Get a reference to the Bridge
    pub fn bridge(&self) -> &Bridge<E> {
        &self.bridge
    }
}
