//! Session-scoped navigation controller for the Wayfare marketplace.
//!
//! Pure state machine and generic runtime wiring the auth provider's session
//! feed to role-scoped navigation subtrees and realtime channels, enabling
//! deterministic tests with the same code that runs against the hosted
//! backend.
//!
//! # Components
//!
//! - [`Controller`]: navigation/session state machine (role routing, channel
//!   lifecycle, bounded navigation retries)
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod controller;
mod driver;
mod event;
mod runtime;

pub use action::ControllerAction;
pub use controller::Controller;
pub use driver::Driver;
pub use event::{AppPhase, ControllerEvent};
pub use runtime::Runtime;
