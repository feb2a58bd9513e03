//! Application layer for hitfeed
//!
//! Pure state machines and generic runtime for the activity feed and the
//! badge generator, enabling deterministic simulation testing with the same
//! code that runs in production.
//!
//! # Components
//!
//! - [`App`]: UI state machine (badge form, feed, connection status)
//! - [`ActivityFeed`]: Bounded, newest-first activity buffer
//! - [`BadgeGenerator`]: Badge URL and snippet derivation
//! - [`Bridge`]: Protocol bridge (translates stream actions to App events)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
pub mod badge;
mod bridge;
mod driver;
mod event;
pub mod feed;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use badge::{BadgeField, BadgeGenerator, BadgeInputs, BadgeOutput};
pub use bridge::Bridge;
pub use driver::Driver;
pub use event::AppEvent;
pub use feed::{ACTIVITY_CAPACITY, ActivityEvent, ActivityFeed};
pub use input::{BadgeForm, InputField, KeyInput};
pub use runtime::Runtime;
pub use state::ConnectionStatus;
