//! Session-scoped navigation controller.
//!
//! This module defines the [`Controller`] state machine composing the three
//! components of the core: the session store (auth projection), the role
//! router (subtree mounting), and the channel lifecycle (realtime
//! subscriptions).
//!
//! This is a pure state machine: it consumes [`crate::ControllerEvent`]
//! inputs and produces [`crate::ControllerAction`] instructions for the
//! runtime to execute. No I/O dependencies - fully testable without a
//! platform.
//!
//! # Responsibilities
//!
//! - Projects the auth provider's session into a role and selects exactly one
//!   subtree to mount; the mapping is total and exclusive.
//! - Combines the password-reset flag with the session role through a single
//!   pure function; the override never touches the underlying session.
//! - Owns the channel set: every tracked channel closes before a different
//!   key set opens, and backgrounding closes everything.
//! - Applies navigation signals against the mounted subtree with a bounded,
//!   linearly backed-off retry budget; superseded signals are cancelled.

use std::time::Duration;

use wayfare_core::{
    channel::{ChannelKey, ChannelPlan, ChannelSet},
    error::NavigateError,
    role::{Role, SubtreeKey, effective_subtree},
    route::{NavParams, RouteTable, RouteTree},
    session::{Session, SessionStore},
    signal::{NavigationSignal, RetryPolicy},
};

use crate::{AppPhase, ControllerAction, ControllerEvent};

/// Navigation controller state machine.
#[derive(Debug, Clone)]
pub struct Controller {
    /// Session projection, owned here and read-only elsewhere.
    store: SessionStore,
    /// Role-to-subtree mapping.
    routes: RouteTable,
    /// Role-to-topics mapping for realtime channels.
    plan: ChannelPlan,
    /// Bounded navigation retry policy.
    policy: RetryPolicy,
    /// Open channels, mutated only through open/close actions.
    channels: ChannelSet,
    /// Channel keys most recently requested. Compared against the desired set
    /// to avoid churning channels on no-op transitions like token refresh.
    requested: Vec<ChannelKey>,
    /// Password-reset override flag, independent of the session.
    resetting_password: bool,
    /// Current app lifecycle phase.
    phase: AppPhase,
    /// Currently mounted subtree.
    mounted: SubtreeKey,
    /// Bumped on every mount change; navigation signals issued under an older
    /// generation are cancelled.
    mount_generation: u64,
    /// Bumped on every channel re-plan; open acknowledgments carrying an
    /// older generation are closed instead of tracked.
    channel_generation: u64,
}

impl Controller {
    /// Create a controller over the given route table and channel plan.
    ///
    /// Starts unauthenticated, foregrounded, with nothing mounted until
    /// [`Controller::start`] is processed.
    pub fn new(routes: RouteTable, plan: ChannelPlan, policy: RetryPolicy) -> Self {
        Self {
            store: SessionStore::new(),
            routes,
            plan,
            policy,
            channels: ChannelSet::new(),
            requested: Vec::new(),
            resetting_password: false,
            phase: AppPhase::Active,
            mounted: SubtreeKey::Unauthenticated,
            mount_generation: 0,
            channel_generation: 0,
        }
    }

    /// Controller over the standard marketplace tables with default policy.
    pub fn marketplace() -> Self {
        Self::new(RouteTable::marketplace(), ChannelPlan::marketplace(), RetryPolicy::default())
    }

    /// Initial actions: mount the unauthenticated subtree.
    pub fn start(&mut self) -> Vec<ControllerAction> {
        vec![ControllerAction::MountSubtree { key: self.mounted }]
    }

    /// Process an event and return actions for the runtime to execute.
    pub fn handle(&mut self, event: ControllerEvent) -> Vec<ControllerAction> {
        match event {
            ControllerEvent::SessionChanged(payload) => {
                if let Err(err) = self.store.apply(payload) {
                    // Unknown role claims route to the unauthenticated
                    // subtree rather than guessing.
                    tracing::warn!(%err, "session change rejected");
                }
                self.retarget()
            },
            ControllerEvent::SessionEventFailed { reason } => {
                self.store.retain(&reason);
                vec![]
            },
            ControllerEvent::PhaseChanged(phase) => {
                self.phase = phase;
                self.retarget()
            },
            ControllerEvent::DeepLink { path } => self.handle_deep_link(&path),
            ControllerEvent::NotificationTap { screen, params } => {
                self.handle_notification_tap(screen, params)
            },
            ControllerEvent::NavigationNotReady { signal } => self.handle_not_ready(signal),
            ControllerEvent::ChannelOpened { key, handle, generation } => {
                if generation != self.channel_generation {
                    tracing::debug!(topic = key.topic, "closing channel opened under stale plan");
                    return vec![ControllerAction::CloseChannel { key, handle }];
                }
                if !self.channels.track(key.clone(), handle) {
                    tracing::warn!(topic = key.topic, "duplicate channel open, closing extra");
                    return vec![ControllerAction::CloseChannel { key, handle }];
                }
                vec![]
            },
            ControllerEvent::ChannelOpenFailed { key, error } => {
                tracing::warn!(topic = key.topic, %error, "channel open failed");
                vec![]
            },
        }
    }

    /// Enter the password-reset override: the unauthenticated subtree mounts
    /// while the underlying session stays untouched.
    pub fn start_password_reset(&mut self) -> Vec<ControllerAction> {
        self.resetting_password = true;
        self.retarget()
    }

    /// Leave the password-reset override, restoring the subtree matching the
    /// unchanged session role.
    pub fn finish_password_reset(&mut self) -> Vec<ControllerAction> {
        self.resetting_password = false;
        self.retarget()
    }

    /// Request sign-out from the auth provider. The actual transition happens
    /// when the provider's feed delivers the resulting session change.
    pub fn sign_out(&self) -> Vec<ControllerAction> {
        vec![ControllerAction::SignOut]
    }

    /// Teardown: cancel pending navigation and close every open channel.
    pub fn teardown(&mut self) -> Vec<ControllerAction> {
        self.mount_generation += 1;
        self.channel_generation += 1;
        self.requested.clear();
        self.channels
            .drain()
            .into_iter()
            .map(|(key, handle)| ControllerAction::CloseChannel { key, handle })
            .collect()
    }

    /// Current derived role. `None` if signed out.
    pub fn current_role(&self) -> Option<Role> {
        self.store.role()
    }

    /// Current session projection. `None` if signed out.
    pub fn current_session(&self) -> Option<&Session> {
        self.store.session()
    }

    /// Whether the password-reset override is active.
    pub fn is_resetting_password(&self) -> bool {
        self.resetting_password
    }

    /// Currently mounted subtree key.
    pub fn mounted_subtree(&self) -> SubtreeKey {
        self.mounted
    }

    /// Route tree for a subtree key.
    pub fn subtree(&self, key: SubtreeKey) -> &RouteTree {
        self.routes.subtree(key)
    }

    /// Route tree of the mounted subtree (the navigation root).
    pub fn mounted_tree(&self) -> &RouteTree {
        self.routes.subtree(self.mounted)
    }

    /// Keys of the currently open channels.
    pub fn open_channels(&self) -> impl Iterator<Item = &ChannelKey> {
        self.channels.keys()
    }

    /// Number of currently open channels.
    pub fn open_channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Re-evaluate the mounted subtree and the channel set after any input
    /// that can move them.
    ///
    /// Emitted order is fixed: mount (implying unmount of the old subtree),
    /// then close of every tracked channel, then opens for the new set.
    /// Channel actions are emitted only when the desired set actually
    /// changed, so a token refresh or the password-reset override leaves
    /// channels alone.
    fn retarget(&mut self) -> Vec<ControllerAction> {
        let mut actions = Vec::new();

        let desired_subtree = effective_subtree(self.resetting_password, self.store.role());
        if desired_subtree != self.mounted {
            self.mounted = desired_subtree;
            self.mount_generation += 1;
            actions.push(ControllerAction::MountSubtree { key: desired_subtree });
        }

        let desired = self.desired_channel_keys();
        if desired != self.requested {
            self.channel_generation += 1;
            self.requested = desired.clone();
            for (key, handle) in self.channels.drain() {
                actions.push(ControllerAction::CloseChannel { key, handle });
            }
            for key in desired {
                actions.push(ControllerAction::OpenChannel {
                    key,
                    generation: self.channel_generation,
                });
            }
        }

        actions
    }

    /// Channel keys the current (phase, session) should hold open.
    fn desired_channel_keys(&self) -> Vec<ChannelKey> {
        if self.phase == AppPhase::Background {
            return Vec::new();
        }
        match self.store.session() {
            Some(session) => self.plan.keys_for(session.role(), session.user_id()),
            None => Vec::new(),
        }
    }

    /// Resolve a deep-link path against the mounted subtree.
    ///
    /// Paths that do not resolve (including paths belonging to another role's
    /// subtree) are dropped with a log, never queued.
    fn handle_deep_link(&mut self, path: &str) -> Vec<ControllerAction> {
        let Some((screen, params)) = self.mounted_tree().resolve_path(path) else {
            tracing::warn!(path, subtree = ?self.mounted, "deep link does not resolve, dropped");
            return vec![];
        };

        let signal = NavigationSignal::new(screen.name, params, self.mount_generation);
        vec![ControllerAction::AttemptNavigation { signal, delay: Duration::ZERO }]
    }

    /// Resolve a notification tap's explicit screen target against the
    /// mounted subtree. Same drop policy as deep links.
    fn handle_notification_tap(
        &mut self,
        screen: String,
        params: NavParams,
    ) -> Vec<ControllerAction> {
        if !self.mounted_tree().contains(&screen) {
            tracing::warn!(%screen, subtree = ?self.mounted, "notification target not in mounted subtree, dropped");
            return vec![];
        }

        let signal = NavigationSignal::new(screen, params, self.mount_generation);
        vec![ControllerAction::AttemptNavigation { signal, delay: Duration::ZERO }]
    }

    /// Decide whether a failed navigation attempt retries or drops.
    fn handle_not_ready(&mut self, signal: NavigationSignal) -> Vec<ControllerAction> {
        if signal.generation != self.mount_generation {
            tracing::debug!(screen = %signal.screen, "navigation signal superseded, cancelled");
            return vec![];
        }
        if self.policy.exhausted(signal.attempt) {
            let err = NavigateError::NotReady {
                attempt: signal.attempt,
                max: self.policy.max_attempts,
            };
            tracing::warn!(screen = %signal.screen, %err, "navigation retries exhausted, signal dropped");
            return vec![];
        }

        let signal = signal.next_attempt();
        let delay = self.policy.delay(signal.attempt);
        vec![ControllerAction::AttemptNavigation { signal, delay }]
    }
}
