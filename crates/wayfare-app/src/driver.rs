//! Driver trait for abstracting platform I/O.
//!
//! The [`Driver`] trait decouples the controller runtime from the hosted
//! backend and the host platform. An implementation adapts four external
//! collaborators into one seam:
//!
//! - the auth provider's session-change feed,
//! - the realtime transport's channel open/close,
//! - the navigation surface (readiness, navigate, history reset),
//! - the app-lifecycle and deep-link/notification sources.
//!
//! The generic [`crate::Runtime`] handles all orchestration, so the same
//! controller logic runs against production SDK bindings and against the
//! scripted in-memory driver used in tests.

use std::future::Future;

use wayfare_core::{
    channel::{ChannelHandle, ChannelKey},
    route::{NavParams, Screen},
};

use crate::ControllerEvent;

/// Abstracts platform I/O for the controller runtime.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next external event.
    ///
    /// Delivers session changes (including the provider's current session at
    /// startup), lifecycle changes, deep links, and notification taps as
    /// [`ControllerEvent`]s. Recoverable feed failures
    /// should be delivered as [`ControllerEvent::SessionEventFailed`] rather
    /// than returned as errors. Returns `None` when the event source has
    /// closed; the runtime then tears down and exits.
    ///
    /// # Errors
    ///
    /// Returns an error only for unrecoverable driver failures.
    fn poll_event(
        &mut self,
    ) -> impl Future<Output = Result<Option<ControllerEvent>, Self::Error>> + Send;

    /// Whether the navigation surface can accept navigation right now.
    fn is_ready(&self) -> bool;

    /// Mount a subtree root: reset navigation history to the given default
    /// entry screen, unmounting whatever was mounted.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the reset.
    fn reset_to(&mut self, screen: &Screen) -> Result<(), Self::Error>;

    /// Navigate to a screen in the mounted subtree.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the navigation.
    fn navigate(&mut self, screen: &str, params: &NavParams) -> Result<(), Self::Error>;

    /// Open a realtime channel, returning the transport's handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription cannot be established.
    fn open_channel(
        &mut self,
        key: &ChannelKey,
    ) -> impl Future<Output = Result<ChannelHandle, Self::Error>> + Send;

    /// Close a realtime channel. Best-effort.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the close.
    fn close_channel(
        &mut self,
        key: &ChannelKey,
        handle: ChannelHandle,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Ask the auth provider to sign out. The provider's feed will deliver
    /// the resulting session change.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails.
    fn sign_out(&mut self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
