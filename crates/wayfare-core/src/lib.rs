//! Domain types and pure state for the Wayfare navigation controller.
//!
//! This crate holds everything the controller reasons about, free of I/O:
//! roles and subtree selection, the session projection, route trees with
//! deep-link patterns, navigation signals with their bounded retry policy,
//! realtime channel bookkeeping, and the [`Environment`] time abstraction
//! that enables deterministic tests.

pub mod channel;
pub mod env;
pub mod error;
pub mod role;
pub mod route;
pub mod session;
pub mod signal;

pub use channel::{ChannelHandle, ChannelKey, ChannelPlan, ChannelSet};
pub use env::{Environment, SystemEnv};
pub use error::{ChannelError, NavigateError, SessionError};
pub use role::{Role, SubtreeKey, effective_subtree};
pub use route::{LoadStrategy, NavParams, RouteTable, RouteTree, Screen};
pub use session::{Session, SessionPayload, SessionStore, UserId};
pub use signal::{NavigationSignal, RetryPolicy};
