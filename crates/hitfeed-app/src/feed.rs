//! Rolling feed of recent activity.
//!
//! The feed is the only consumer of stream data. It keeps the most recent
//! [`ACTIVITY_CAPACITY`] events in arrival order and renders them newest
//! first:
//!
//! ```text
//! storage (oldest → newest)     rendered (newest → oldest)
//! ┌───┬───┬───┬─────┬────┐      12:00:14 webklex/gohits
//! │ 1 │ 2 │ 3 │ ... │ 15 │      12:00:13 webklex/other
//! └───┴───┴───┴─────┴────┘      ...
//!   ↑ evicted first             12:00:00 webklex/first
//! ```

use std::collections::VecDeque;

use chrono::NaiveTime;

/// Maximum number of events kept in the feed.
pub const ACTIVITY_CAPACITY: usize = 15;

/// Format of the capture time in rendered lines.
const TIME_FORMAT: &str = "%H:%M:%S";

/// One received activity message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEvent {
    /// Client-side wall-clock time the message was captured at.
    pub received_at: NaiveTime,
    /// Raw message payload.
    pub text: String,
}

impl ActivityEvent {
    /// Capture time as shown: `HH:MM:SS`, zero-padded.
    pub fn timestamp(&self) -> String {
        self.received_at.format(TIME_FORMAT).to_string()
    }

    /// Display line: `<timestamp> <text>`.
    pub fn line(&self) -> String {
        format!("{} {}", self.timestamp(), self.text)
    }
}

/// Bounded, time-ordered activity buffer.
///
/// # Invariants
///
/// - `len() <= ACTIVITY_CAPACITY`
/// - Events are stored in arrival order. When full, the oldest is evicted.
#[derive(Debug, Clone, Default)]
pub struct ActivityFeed {
    events: VecDeque<ActivityEvent>,
}

impl ActivityFeed {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self { events: VecDeque::with_capacity(ACTIVITY_CAPACITY) }
    }

    /// Record a message captured at `received_at`.
    ///
    /// Evicts the oldest event if the feed is full.
    pub fn on_event(&mut self, text: impl Into<String>, received_at: NaiveTime) {
        if self.events.len() == ACTIVITY_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(ActivityEvent { received_at, text: text.into() });
    }

    /// Events in storage order, oldest first.
    pub fn events(&self) -> impl DoubleEndedIterator<Item = &ActivityEvent> + ExactSizeIterator {
        self.events.iter()
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if no events are buffered.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Display lines, newest first.
    pub fn render(&self) -> Vec<String> {
        self.events.iter().rev().map(ActivityEvent::line).collect()
    }

    /// Display lines, newest first, joined by newlines.
    pub fn render_text(&self) -> String {
        self.render().join("\n")
    }
}
