//! Error types for the navigation controller core.
//!
//! Strongly-typed errors per layer: session projection (auth event handling),
//! navigation attempts, and realtime channel operations. All of these are
//! contained by the controller and runtime: logged and recovered from, never
//! surfaced as a crash.

use thiserror::Error;

/// Errors that can occur while projecting the auth provider's session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The provider's session-change feed failed to deliver an event.
    ///
    /// Recovery: the store retains the last known good session.
    #[error("session event delivery failed: {reason}")]
    EventDelivery {
        /// Provider-reported failure description.
        reason: String,
    },

    /// The session payload carried a role claim outside the recognized set.
    ///
    /// Recovery: the caller routes to the unauthenticated subtree.
    #[error("unknown role claim: {0:?}")]
    UnknownRole(String),
}

/// Errors that can occur while applying a navigation signal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigateError {
    /// The navigation surface is not ready to accept navigation.
    #[error("navigation surface not ready (attempt {attempt} of {max})")]
    NotReady {
        /// Attempt number that failed (1-based).
        attempt: u32,
        /// Maximum attempts allowed by the retry policy.
        max: u32,
    },

    /// The surface rejected the navigation call itself.
    #[error("navigation surface error: {reason}")]
    Surface {
        /// Surface-reported failure description.
        reason: String,
    },
}

impl NavigateError {
    /// Returns true if this error is transient and may succeed on retry.
    ///
    /// A not-yet-ready surface becomes ready once the mount completes; a
    /// surface rejection will not fix itself by retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NotReady { .. })
    }
}

/// Errors that can occur during realtime channel operations.
///
/// Channel open/close is best-effort: these errors are logged and never block
/// a navigation transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Opening a subscription channel failed.
    #[error("failed to open channel {topic:?}: {reason}")]
    Open {
        /// Topic that failed to open.
        topic: String,
        /// Transport-reported failure description.
        reason: String,
    },

    /// Closing a subscription channel failed.
    #[error("failed to close channel {topic:?}: {reason}")]
    Close {
        /// Topic that failed to close.
        topic: String,
        /// Transport-reported failure description.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_is_transient() {
        assert!(NavigateError::NotReady { attempt: 1, max: 3 }.is_transient());
        assert!(!NavigateError::Surface { reason: "detached".into() }.is_transient());
    }

    #[test]
    fn error_messages_name_the_topic() {
        let err = ChannelError::Open { topic: "offers:u1".into(), reason: "timeout".into() };
        assert!(err.to_string().contains("offers:u1"));
    }
}
