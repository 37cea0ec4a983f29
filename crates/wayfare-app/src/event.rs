//! Controller input events.
//!
//! Events originate from the platform driver: the auth provider's
//! session-change feed, app-lifecycle callbacks, deep links and notification
//! taps, and feedback from the runtime's own action execution (failed
//! navigation attempts, channel acknowledgments).

use wayfare_core::{
    channel::{ChannelHandle, ChannelKey},
    error::ChannelError,
    route::NavParams,
    session::SessionPayload,
    signal::NavigationSignal,
};

/// App lifecycle phase as delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Foreground, receiving input.
    Active,
    /// Foreground but not receiving input (e.g. app switcher).
    Inactive,
    /// Backgrounded. All channels close in this phase.
    Background,
}

/// Events processed by the controller state machine.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// The auth provider delivered a session change (sign-in, token refresh,
    /// sign-out as `None`).
    SessionChanged(Option<SessionPayload>),

    /// The session-change feed itself failed. The last known session is
    /// retained.
    SessionEventFailed {
        /// Provider-reported failure description.
        reason: String,
    },

    /// App lifecycle phase changed.
    PhaseChanged(AppPhase),

    /// A deep link arrived as a URL path, resolved against the mounted
    /// subtree's path patterns.
    DeepLink {
        /// Path portion of the link, e.g. `"requests/42"`.
        path: String,
    },

    /// A notification tap arrived as an explicit screen target.
    NotificationTap {
        /// Target screen name.
        screen: String,
        /// Parameters to pass to the screen.
        params: NavParams,
    },

    /// A navigation attempt found the surface not ready.
    NavigationNotReady {
        /// The signal that failed its current attempt.
        signal: NavigationSignal,
    },

    /// The transport acknowledged an opened channel.
    ChannelOpened {
        /// Key the channel was opened for.
        key: ChannelKey,
        /// Transport-issued handle.
        handle: ChannelHandle,
        /// Channel generation the open was requested under.
        generation: u64,
    },

    /// The transport failed to open a channel. Best-effort: logged, never
    /// blocks a transition.
    ChannelOpenFailed {
        /// Key the open was requested for.
        key: ChannelKey,
        /// What went wrong.
        error: ChannelError,
    },
}
