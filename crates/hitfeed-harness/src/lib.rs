//! Deterministic simulation harness for hitfeed.
//!
//! Scripted implementations of the [`hitfeed_app::Driver`] and
//! [`hitfeed_core::Environment`] traits, so the production
//! [`hitfeed_app::Runtime`] can be driven cycle by cycle with fully
//! reproducible sockets and clocks.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the common
//! feed and badge invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    AppSnapshot, BadgeMatchesInputs, FeedHoldsLatestDeliveries, FeedWithinCapacity, Invariant,
    InvariantKind, InvariantRegistry, InvariantResult, Violation,
};
pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_env::SimEnv;
