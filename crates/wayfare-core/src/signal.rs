//! Pending navigation requests and the bounded retry policy.
//!
//! A [`NavigationSignal`] is created from a deep link or notification tap and
//! consumed exactly once: applied against the mounted subtree when the
//! navigation surface becomes ready, or dropped after the retry budget is
//! exhausted. Cancellation is a first-class input: each signal carries the
//! mount generation it was issued under, and signals from a superseded
//! generation are discarded without further attempts.

use std::time::Duration;

use crate::route::NavParams;

/// Default maximum navigation attempts before a signal is dropped.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay unit; attempt `n` waits `n * base_delay` before retrying.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(250);

/// Bounded retry policy for navigation attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum attempts (including the first).
    pub max_attempts: u32,
    /// Delay unit; scaled linearly with the attempt number.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS, base_delay: DEFAULT_BASE_DELAY }
    }
}

impl RetryPolicy {
    /// Delay to wait before the given attempt (1-based).
    ///
    /// The first attempt runs immediately; attempt `n > 1` waits
    /// `(n - 1) * base_delay`.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * attempt.saturating_sub(1)
    }

    /// Whether a signal that has completed `attempt` attempts is out of
    /// budget.
    pub fn exhausted(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }
}

/// A pending deep-link or notification-triggered navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSignal {
    /// Target screen name.
    pub screen: String,
    /// Parameters to pass to the screen.
    pub params: NavParams,
    /// Attempt number this signal is on (1-based).
    pub attempt: u32,
    /// Mount generation the signal was issued under. A role transition bumps
    /// the generation, cancelling signals issued before it.
    pub generation: u64,
}

impl NavigationSignal {
    /// Create a first-attempt signal under the given mount generation.
    pub fn new(screen: impl Into<String>, params: NavParams, generation: u64) -> Self {
        Self { screen: screen.into(), params, attempt: 1, generation }
    }

    /// The same signal, moved to its next attempt.
    pub fn next_attempt(mut self) -> Self {
        self.attempt += 1;
        self
    }
}
