//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the application completely decoupled from I/O and
//! stream mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Owns the [`ActivityFeed`] and the [`BadgeGenerator`].
//! - Edits the badge form and commits it on Enter or Tab.
//! - Stores terminal dimensions to handle resize events.
//! - Tracks high-level connection status for UI feedback.

use hitfeed_core::Origin;

use crate::{
    ActivityFeed, AppAction, AppEvent, BadgeField, BadgeForm, BadgeGenerator, ConnectionStatus,
    KeyInput,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection status.
    status: ConnectionStatus,
    /// Connection instance the status belongs to. 0 before the first.
    attempt: u64,
    /// Service origin.
    origin: Origin,
    /// Recent activity.
    feed: ActivityFeed,
    /// Badge inputs and outputs.
    badge: BadgeGenerator,
    /// Editable badge inputs.
    form: BadgeForm,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App for the service at `origin`.
    ///
    /// The badge is generated once with default inputs.
    pub fn new(origin: Origin) -> Self {
        let badge = BadgeGenerator::new(&origin);
        let form = BadgeForm::new(badge.inputs());
        Self {
            status: ConnectionStatus::Idle,
            attempt: 0,
            origin,
            feed: ActivityFeed::new(),
            badge,
            form,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::StreamStateChanged { state, attempt } => {
                self.status = state.into();
                self.attempt = attempt;
                vec![AppAction::Render]
            },
            AppEvent::ActivityReceived { text, received_at } => {
                self.feed.on_event(text, received_at);
                vec![AppAction::Render]
            },
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc => self.quit(),
            KeyInput::Enter => {
                self.commit(self.form.focus());
                vec![AppAction::Render]
            },
            KeyInput::Tab => {
                self.commit(self.form.focus());
                self.form.cycle_focus();
                vec![AppAction::Render]
            },
            key => {
                if self.form.focused_mut().edit(key) {
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
        }
    }

    /// Commit the form value of `field` as an input change.
    fn commit(&mut self, field: BadgeField) {
        let value = self.form.field(field).text().to_owned();
        self.badge.on_input_change(field, &value);

        self.status_message = Some(if value.is_empty() {
            format!("{} unchanged: {}", field.label(), self.badge.inputs().get(field))
        } else {
            format!("{} set to {value}", field.label())
        });
    }

    /// Apply a badge input from outside the form (startup arguments).
    ///
    /// Behaves like a committed edit: an empty value is ignored. The form
    /// field is reset to the stored value.
    pub fn apply_badge_input(&mut self, field: BadgeField, value: &str) -> Vec<AppAction> {
        self.badge.on_input_change(field, value);

        let focus = self.form.focus();
        let inputs = self.badge.inputs().clone();
        self.form = BadgeForm::new(&inputs);
        if focus != self.form.focus() {
            self.form.cycle_focus();
        }
        vec![AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Current connection status.
    pub fn connection_status(&self) -> ConnectionStatus {
        self.status
    }

    /// Connection instance the status belongs to. 0 before the first.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Service origin.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Recent activity.
    pub fn feed(&self) -> &ActivityFeed {
        &self.feed
    }

    /// Badge inputs and generated output.
    pub fn badge(&self) -> &BadgeGenerator {
        &self.badge
    }

    /// Badge form being edited.
    pub fn form(&self) -> &BadgeForm {
        &self.form
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
