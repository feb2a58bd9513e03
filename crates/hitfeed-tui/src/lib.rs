//! Terminal UI for hitfeed
//!
//! A thin shell over [`hitfeed_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`hitfeed_app::Runtime`].
//!
//! This crate only handles terminal rendering, the socket and logging setup.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod logging;
pub mod report;
pub mod terminal;
pub mod ui;

pub use hitfeed_app::{App, AppAction, AppEvent, Bridge, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
