//! Realtime channel bookkeeping.
//!
//! The channel set is owned exclusively by the lifecycle manager and exposed
//! only through open/close operations: at most one channel per
//! (role, user, topic) key, and every tracked channel is drained before a
//! different key set opens.

use std::collections::HashMap;

use crate::{
    role::Role,
    session::UserId,
};

/// Opaque handle to a live subscription, issued by the realtime transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelHandle(
    /// Transport-issued identifier.
    pub u64,
);

/// Key identifying one subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelKey {
    /// Role the subscription is scoped to.
    pub role: Role,
    /// User the subscription is scoped to.
    pub user_id: UserId,
    /// Topic name, owned by the external collaborators.
    pub topic: &'static str,
}

/// Mapping from role to the topics that role subscribes to.
#[derive(Debug, Clone)]
pub struct ChannelPlan {
    client: &'static [&'static str],
    agent: &'static [&'static str],
    company: &'static [&'static str],
    admin: &'static [&'static str],
}

impl ChannelPlan {
    /// Build a plan from per-role topic lists.
    pub fn new(
        client: &'static [&'static str],
        agent: &'static [&'static str],
        company: &'static [&'static str],
        admin: &'static [&'static str],
    ) -> Self {
        Self { client, agent, company, admin }
    }

    /// The travel-marketplace channel plan.
    pub fn marketplace() -> Self {
        Self::new(
            &["offers", "notifications"],
            &["requests", "notifications"],
            &["agents", "notifications"],
            &["companies", "notifications"],
        )
    }

    /// Topics for a role.
    pub fn topics(&self, role: Role) -> &'static [&'static str] {
        match role {
            Role::Client => self.client,
            Role::Agent => self.agent,
            Role::Company => self.company,
            Role::Admin => self.admin,
        }
    }

    /// Channel keys a (role, user) pair should hold open.
    pub fn keys_for(&self, role: Role, user_id: &UserId) -> Vec<ChannelKey> {
        self.topics(role)
            .iter()
            .map(|topic| ChannelKey { role, user_id: user_id.clone(), topic })
            .collect()
    }
}

/// Set of currently open channels.
///
/// Mutated only by the lifecycle manager; everything else gets read-only
/// views.
#[derive(Debug, Clone, Default)]
pub struct ChannelSet {
    open: HashMap<ChannelKey, ChannelHandle>,
}

impl ChannelSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an opened channel.
    ///
    /// Returns `false` (and leaves the existing entry untouched) if a channel
    /// is already open for this key.
    pub fn track(&mut self, key: ChannelKey, handle: ChannelHandle) -> bool {
        if self.open.contains_key(&key) {
            return false;
        }
        self.open.insert(key, handle);
        true
    }

    /// Remove and return every tracked channel, for closing.
    pub fn drain(&mut self) -> Vec<(ChannelKey, ChannelHandle)> {
        self.open.drain().collect()
    }

    /// Whether any channel is open.
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Number of open channels.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Read-only view of the tracked keys.
    pub fn keys(&self) -> impl Iterator<Item = &ChannelKey> {
        self.open.keys()
    }

    /// Whether a channel is open for this key.
    pub fn contains(&self, key: &ChannelKey) -> bool {
        self.open.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(role: Role, user: &str, topic: &'static str) -> ChannelKey {
        ChannelKey { role, user_id: UserId::new(user), topic }
    }

    #[test]
    fn track_rejects_duplicate_key() {
        let mut set = ChannelSet::new();
        assert!(set.track(key(Role::Agent, "u1", "requests"), ChannelHandle(1)));
        assert!(!set.track(key(Role::Agent, "u1", "requests"), ChannelHandle(2)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn drain_empties_the_set() {
        let mut set = ChannelSet::new();
        set.track(key(Role::Agent, "u1", "requests"), ChannelHandle(1));
        set.track(key(Role::Agent, "u1", "notifications"), ChannelHandle(2));

        let drained = set.drain();
        assert_eq!(drained.len(), 2);
        assert!(set.is_empty());
    }

    #[test]
    fn plan_scopes_keys_to_role_and_user() {
        let plan = ChannelPlan::marketplace();
        let keys = plan.keys_for(Role::Company, &UserId::new("u9"));

        assert_eq!(keys.len(), 2);
        assert!(keys.iter().all(|k| k.role == Role::Company && k.user_id.as_str() == "u9"));
    }

    #[test]
    fn every_role_has_topics() {
        let plan = ChannelPlan::marketplace();
        for role in [Role::Client, Role::Agent, Role::Company, Role::Admin] {
            assert!(!plan.topics(role).is_empty());
        }
    }
}
