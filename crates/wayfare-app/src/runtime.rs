//! Generic runtime for controller orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`Controller`]: pure navigation/session state machine
//! - [`Driver`]: platform-specific I/O
//! - [`Environment`]: time source for retry backoff
//!
//! One event is processed to completion - including awaited channel
//! operations and the action feedback loop - before the next event is
//! admitted, so the mounted subtree and the channel set are never mutated by
//! interleaved handlers.

use wayfare_core::{
    env::Environment,
    error::{ChannelError, NavigateError},
};

use crate::{Controller, ControllerAction, ControllerEvent, Driver};

/// Runtime that orchestrates Controller, Driver, and Environment.
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    env: E,
    controller: Controller,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a new runtime with the given driver and environment.
    pub fn new(driver: D, env: E, controller: Controller) -> Self {
        Self { driver, env, controller }
    }

    /// Run the main event loop.
    ///
    /// Mounts the initial subtree, then processes external events until the
    /// driver's event source closes, at which point every open channel is
    /// closed and the loop exits.
    ///
    /// # Errors
    ///
    /// Returns an error only if the driver's event feed fails unrecoverably.
    /// Everything else (surface rejections, channel failures, dropped
    /// signals) is contained and logged.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let actions = self.controller.start();
        self.execute(actions).await;

        while let Some(event) = self.driver.poll_event().await? {
            let actions = self.controller.handle(event);
            self.execute(actions).await;
        }

        let actions = self.controller.teardown();
        self.execute(actions).await;
        Ok(())
    }

    /// Execute actions in emission order, feeding follow-up events back to
    /// the controller until the queue drains.
    async fn execute(&mut self, initial_actions: Vec<ControllerAction>) {
        let mut pending = initial_actions;

        while !pending.is_empty() {
            let actions = std::mem::take(&mut pending);

            for action in actions {
                match action {
                    ControllerAction::MountSubtree { key } => {
                        let screen = self.controller.subtree(key).default_screen().clone();
                        if let Err(e) = self.driver.reset_to(&screen) {
                            tracing::error!(?key, error = %e, "failed to mount subtree");
                        }
                    },
                    ControllerAction::OpenChannel { key, generation } => {
                        let follow_up = match self.driver.open_channel(&key).await {
                            Ok(handle) => self.controller.handle(
                                ControllerEvent::ChannelOpened { key, handle, generation },
                            ),
                            Err(e) => {
                                let error = ChannelError::Open {
                                    topic: key.topic.to_string(),
                                    reason: e.to_string(),
                                };
                                self.controller
                                    .handle(ControllerEvent::ChannelOpenFailed { key, error })
                            },
                        };
                        pending.extend(follow_up);
                    },
                    ControllerAction::CloseChannel { key, handle } => {
                        if let Err(e) = self.driver.close_channel(&key, handle).await {
                            let err = ChannelError::Close {
                                topic: key.topic.to_string(),
                                reason: e.to_string(),
                            };
                            tracing::warn!(%err, "channel close failed");
                        }
                    },
                    ControllerAction::AttemptNavigation { signal, delay } => {
                        if !delay.is_zero() {
                            self.env.sleep(delay).await;
                        }

                        if self.driver.is_ready() {
                            if let Err(e) = self.driver.navigate(&signal.screen, &signal.params) {
                                let err = NavigateError::Surface { reason: e.to_string() };
                                tracing::warn!(
                                    screen = %signal.screen,
                                    %err,
                                    "navigation rejected by surface, signal dropped"
                                );
                            }
                        } else {
                            let follow_up = self
                                .controller
                                .handle(ControllerEvent::NavigationNotReady { signal });
                            pending.extend(follow_up);
                        }
                    },
                    ControllerAction::SignOut => {
                        if let Err(e) = self.driver.sign_out().await {
                            tracing::error!(error = %e, "sign-out request failed");
                        }
                    },
                }
            }
        }
    }

    /// Process a single event and execute its actions.
    ///
    /// For platforms that push events through callbacks instead of a poll
    /// loop. The same run-to-completion rule applies: the call returns only
    /// after every resulting action has executed.
    pub async fn dispatch(&mut self, event: ControllerEvent) {
        let actions = self.controller.handle(event);
        self.execute(actions).await;
    }

    /// Enter the password-reset override and apply the resulting transition.
    pub async fn start_password_reset(&mut self) {
        let actions = self.controller.start_password_reset();
        self.execute(actions).await;
    }

    /// Leave the password-reset override and apply the resulting transition.
    pub async fn finish_password_reset(&mut self) {
        let actions = self.controller.finish_password_reset();
        self.execute(actions).await;
    }

    /// Request sign-out through the auth provider.
    pub async fn sign_out(&mut self) {
        let actions = self.controller.sign_out();
        self.execute(actions).await;
    }

    /// Get a reference to the controller.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Get a mutable reference to the controller.
    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }
}
