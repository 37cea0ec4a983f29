//! Marketplace roles and subtree selection.
//!
//! A session's role determines which navigation subtree is visible. Roles are
//! a closed set: dispatch over them is exhaustive, so there is no "unknown
//! role" fallback path once a claim string has been parsed at the boundary.

use std::fmt;

use crate::error::SessionError;

/// Authenticated marketplace role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Traveler submitting travel requests.
    Client,
    /// Agent responding to requests with offers.
    Agent,
    /// Company managing its agents.
    Company,
    /// Administrator managing companies.
    Admin,
}

impl Role {
    /// Parse a role claim string from the auth provider's session payload.
    ///
    /// # Errors
    ///
    /// - `SessionError::UnknownRole` if the claim is outside the closed set.
    pub fn parse(claim: &str) -> Result<Self, SessionError> {
        match claim {
            "client" => Ok(Self::Client),
            "agent" => Ok(Self::Agent),
            "company" => Ok(Self::Company),
            "admin" => Ok(Self::Admin),
            other => Err(SessionError::UnknownRole(other.to_string())),
        }
    }

    /// Claim string as the auth provider spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Agent => "agent",
            Self::Company => "company",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key selecting exactly one navigation subtree.
///
/// The role-to-subtree mapping is total and exclusive: every key resolves to
/// one subtree, and at most one subtree is mounted at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtreeKey {
    /// Sign-in, registration, and password-reset screens.
    Unauthenticated,
    /// Client subtree.
    Client,
    /// Agent subtree.
    Agent,
    /// Company subtree.
    Company,
    /// Admin subtree.
    Admin,
}

impl From<Role> for SubtreeKey {
    fn from(role: Role) -> Self {
        match role {
            Role::Client => Self::Client,
            Role::Agent => Self::Agent,
            Role::Company => Self::Company,
            Role::Admin => Self::Admin,
        }
    }
}

/// Compute the subtree to mount from the two independent inputs.
///
/// The password-reset flag and the session role are combined here and nowhere
/// else: an in-progress password reset forces the unauthenticated subtree
/// without touching the underlying session.
pub fn effective_subtree(resetting_password: bool, role: Option<Role>) -> SubtreeKey {
    if resetting_password {
        return SubtreeKey::Unauthenticated;
    }
    role.map_or(SubtreeKey::Unauthenticated, SubtreeKey::from)
}
