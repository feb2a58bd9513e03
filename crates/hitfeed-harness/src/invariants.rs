//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during system execution.
//! Unlike example-based tests that check specific scenarios, invariants
//! verify behavioral properties across all possible execution paths.
//!
//! # Architecture
//!
//! The invariant system extracts observable state from the App into an
//! [`AppSnapshot`], then runs registered [`Invariant`] checks against it.
//! Violations trigger panics with detailed context for debugging.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = AppSnapshot::from_app(&app);
//! registry.check_all(&snapshot)?;
//! ```

use hitfeed_app::{ACTIVITY_CAPACITY, App};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies which invariant was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantKind {
    /// Feed never holds more than [`ACTIVITY_CAPACITY`] events.
    FeedWithinCapacity,
    /// Feed holds exactly the most recent deliveries.
    FeedHoldsLatestDeliveries,
    /// Badge output is derived from the current, non-empty inputs.
    BadgeMatchesInputs,
}

impl std::fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FeedWithinCapacity => "FeedWithinCapacity",
            Self::FeedHoldsLatestDeliveries => "FeedHoldsLatestDeliveries",
            Self::BadgeMatchesInputs => "BadgeMatchesInputs",
        };
        f.write_str(name)
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Which invariant was violated.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// Observable App state at one point in time.
#[derive(Debug, Clone, Default)]
pub struct AppSnapshot {
    /// Origin as rendered.
    pub origin: String,
    /// Number of buffered feed events.
    pub feed_len: usize,
    /// Stored username.
    pub username: String,
    /// Stored repository.
    pub repository: String,
    /// Generated image URL.
    pub image_url: String,
    /// Generated Markdown snippet.
    pub markdown: String,
    /// Frames the stream client delivered so far. `None` if unknown.
    pub delivered: Option<u64>,
}

impl AppSnapshot {
    /// Capture the observable state of `app`.
    pub fn from_app(app: &App) -> Self {
        let inputs = app.badge().inputs();
        let output = app.badge().output();
        Self {
            origin: app.origin().to_string(),
            feed_len: app.feed().len(),
            username: inputs.username.clone(),
            repository: inputs.repository.clone(),
            image_url: output.image_url.clone(),
            markdown: output.markdown.clone(),
            delivered: None,
        }
    }

    /// Record how many frames the stream client delivered.
    #[must_use]
    pub fn with_delivered(mut self, delivered: u64) -> Self {
        self.delivered = Some(delivered);
        self
    }
}

/// An invariant that can be checked against App state.
///
/// Invariants are behavioral properties that must always hold.
/// They capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Invariant kind for error reporting.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against the current state.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, state: &AppSnapshot) -> InvariantResult;
}

/// Feed length never exceeds its capacity.
pub struct FeedWithinCapacity;

impl Invariant for FeedWithinCapacity {
    fn kind(&self) -> InvariantKind {
        InvariantKind::FeedWithinCapacity
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        if state.feed_len > ACTIVITY_CAPACITY {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("feed holds {} events, capacity {ACTIVITY_CAPACITY}", state.feed_len),
            });
        }
        Ok(())
    }
}

/// Every delivered frame reaches the feed, and only delivered frames do.
///
/// With `n` deliveries the feed holds `min(n, capacity)` events. Skipped if
/// the delivery count is unknown.
pub struct FeedHoldsLatestDeliveries;

impl Invariant for FeedHoldsLatestDeliveries {
    fn kind(&self) -> InvariantKind {
        InvariantKind::FeedHoldsLatestDeliveries
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let Some(delivered) = state.delivered else {
            return Ok(());
        };

        let expected = usize::try_from(delivered).unwrap_or(usize::MAX).min(ACTIVITY_CAPACITY);
        if state.feed_len != expected {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "{delivered} frames delivered, feed holds {} (expected {expected})",
                    state.feed_len
                ),
            });
        }
        Ok(())
    }
}

/// Badge output always reflects the current inputs, which are never empty.
pub struct BadgeMatchesInputs;

impl Invariant for BadgeMatchesInputs {
    fn kind(&self) -> InvariantKind {
        InvariantKind::BadgeMatchesInputs
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        if state.username.is_empty() || state.repository.is_empty() {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "empty badge input: username {:?}, repository {:?}",
                    state.username, state.repository
                ),
            });
        }

        let expected = format!("{}/svg/{}/{}", state.origin, state.username, state.repository);
        if state.image_url != expected {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("image url {:?}, expected {expected:?}", state.image_url),
            });
        }

        if !state.markdown.contains(&expected) {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("markdown {:?} does not embed {expected:?}", state.markdown),
            });
        }
        Ok(())
    }
}

/// Registry of invariants to check.
///
/// Collects multiple invariants and runs them all against App state.
/// Use [`InvariantRegistry::standard()`] for the common feed and badge
/// invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard invariants.
    ///
    /// Includes:
    /// - [`FeedWithinCapacity`]: feed length is bounded
    /// - [`FeedHoldsLatestDeliveries`]: no delivery lost, nothing extra
    /// - [`BadgeMatchesInputs`]: badge output follows the inputs
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(FeedWithinCapacity);
        registry.add(FeedHoldsLatestDeliveries);
        registry.add(BadgeMatchesInputs);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, state: &AppSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking on first violation.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &AppSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
