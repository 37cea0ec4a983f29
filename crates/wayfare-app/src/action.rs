//! Controller side-effects for the runtime to execute.
//!
//! Actions are emitted in execution order. For a role transition the order is
//! fixed: mount of the new subtree (which unmounts the old and resets
//! history), then close of every old channel, then open of the new role's
//! channels.

use std::time::Duration;

use wayfare_core::{
    channel::{ChannelHandle, ChannelKey},
    role::SubtreeKey,
    signal::NavigationSignal,
};

/// Actions produced by the controller state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerAction {
    /// Mount this subtree as the single navigation root, resetting history to
    /// its default entry screen. Implies unmount of whatever was mounted.
    MountSubtree {
        /// Subtree to mount.
        key: SubtreeKey,
    },

    /// Open a realtime channel.
    OpenChannel {
        /// Key to open the channel for.
        key: ChannelKey,
        /// Channel generation of the request; acknowledgments carrying a
        /// superseded generation are closed instead of tracked.
        generation: u64,
    },

    /// Close a realtime channel. Best-effort.
    CloseChannel {
        /// Key the channel was tracked under.
        key: ChannelKey,
        /// Transport-issued handle to close.
        handle: ChannelHandle,
    },

    /// Attempt to apply a navigation signal after the given delay.
    ///
    /// The runtime sleeps, checks surface readiness, and either navigates or
    /// feeds back [`crate::ControllerEvent::NavigationNotReady`].
    AttemptNavigation {
        /// The pending signal.
        signal: NavigationSignal,
        /// Backoff delay before this attempt (zero for the first).
        delay: Duration,
    },

    /// Ask the auth provider to sign out. The resulting session-change event
    /// drives the actual transition to the unauthenticated subtree.
    SignOut,
}
