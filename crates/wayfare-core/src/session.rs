//! Session projection of the external auth provider.
//!
//! The provider owns the real session (token storage, refresh); the store
//! holds a read-only projection: user identity plus the role parsed from the
//! payload's claim string. Parsing happens once at this boundary, so the rest
//! of the controller works with the closed [`Role`] set only.

use std::fmt;

use crate::{error::SessionError, role::Role};

/// Opaque user identifier as issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Wrap a provider-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw session payload as delivered by the auth provider's change feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPayload {
    /// Provider-issued user identifier.
    pub user_id: UserId,
    /// Role claim string, parsed into [`Role`] by the store.
    pub role_claim: String,
    /// Provider-reported validity flag. Invalid payloads are treated as an
    /// absent session.
    pub valid: bool,
}

/// Validated session projection held by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    role: Role,
}

impl Session {
    /// User this session belongs to.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Role parsed from the session payload.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Tracks the current session and derived role.
///
/// The store never guesses: an event that cannot be projected leaves the last
/// known good session in place ([`SessionStore::retain`]), and an unknown role
/// claim is an error for the caller to route to the unauthenticated subtree.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    current: Option<Session>,
}

impl SessionStore {
    /// Create an empty store (no session, role `None`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a session-change event from the provider feed.
    ///
    /// `None` and invalid payloads clear the session. Returns the projection
    /// now held by the store.
    ///
    /// # Errors
    ///
    /// - `SessionError::UnknownRole` if the role claim is outside the closed
    ///   set. The store clears the session so the caller lands on the
    ///   unauthenticated subtree rather than a misrouted one.
    pub fn apply(
        &mut self,
        payload: Option<SessionPayload>,
    ) -> Result<Option<&Session>, SessionError> {
        let Some(payload) = payload else {
            self.current = None;
            return Ok(None);
        };

        if !payload.valid {
            tracing::debug!(user = %payload.user_id, "invalid session payload treated as absent");
            self.current = None;
            return Ok(None);
        }

        match Role::parse(&payload.role_claim) {
            Ok(role) => {
                self.current = Some(Session { user_id: payload.user_id, role });
                Ok(self.current.as_ref())
            },
            Err(err) => {
                self.current = None;
                Err(err)
            },
        }
    }

    /// Keep the last known good session after a failed event delivery.
    pub fn retain(&self, reason: &str) {
        tracing::error!(reason, "session event delivery failed, retaining last known session");
    }

    /// Current session projection. `None` if signed out.
    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Current derived role. `None` if signed out.
    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(Session::role)
    }
}
