//! Property-based tests for the navigation controller.
//!
//! Invariants are checked after every step of arbitrary input sequences:
//! exactly one subtree is mounted and it matches the pure subtree function,
//! the channel set never holds a key outside the current (role, user), and
//! navigation retries never exceed the budget.

use proptest::prelude::*;
use wayfare_app::{AppPhase, Controller, ControllerAction, ControllerEvent};
use wayfare_core::{
    channel::ChannelHandle,
    role::effective_subtree,
    session::{SessionPayload, UserId},
    signal::RetryPolicy,
};

/// One step of a controller run: an external event or an API call.
#[derive(Debug, Clone)]
enum Step {
    Event(ControllerEvent),
    StartReset,
    FinishReset,
}

fn claim_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop_oneof![
            Just("client".to_string()),
            Just("agent".to_string()),
            Just("company".to_string()),
            Just("admin".to_string()),
        ],
        1 => Just("owner".to_string()), // unknown role claim
    ]
}

fn session_strategy() -> impl Strategy<Value = ControllerEvent> {
    (claim_strategy(), prop_oneof![Just("u1"), Just("u2")], prop::bool::weighted(0.9)).prop_map(
        |(claim, user, valid)| {
            ControllerEvent::SessionChanged(Some(SessionPayload {
                user_id: UserId::new(user),
                role_claim: claim,
                valid,
            }))
        },
    )
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => session_strategy().prop_map(Step::Event),
        1 => Just(Step::Event(ControllerEvent::SessionChanged(None))),
        2 => prop_oneof![
            Just(AppPhase::Active),
            Just(AppPhase::Inactive),
            Just(AppPhase::Background),
        ]
        .prop_map(|p| Step::Event(ControllerEvent::PhaseChanged(p))),
        1 => prop_oneof![
            Just("requests".to_string()),
            Just("requests/7".to_string()),
            Just("agents/3".to_string()),
            Just("nowhere".to_string()),
        ]
        .prop_map(|path| Step::Event(ControllerEvent::DeepLink { path })),
        1 => Just(Step::Event(ControllerEvent::SessionEventFailed {
            reason: "feed error".to_string(),
        })),
        1 => Just(Step::StartReset),
        1 => Just(Step::FinishReset),
    ]
}

/// Apply a step and acknowledge channel opens the way the runtime would.
fn apply(ctrl: &mut Controller, step: Step, next_handle: &mut u64, phase: &mut AppPhase) {
    if let Step::Event(ControllerEvent::PhaseChanged(p)) = &step {
        *phase = *p;
    }
    let actions = match step {
        Step::Event(event) => ctrl.handle(event),
        Step::StartReset => ctrl.start_password_reset(),
        Step::FinishReset => ctrl.finish_password_reset(),
    };
    for action in actions {
        if let ControllerAction::OpenChannel { key, generation } = action {
            *next_handle += 1;
            let _ = ctrl.handle(ControllerEvent::ChannelOpened {
                key,
                handle: ChannelHandle(*next_handle),
                generation,
            });
        }
    }
}

proptest! {
    #[test]
    fn prop_mounted_subtree_matches_pure_function(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let mut ctrl = Controller::marketplace();
        let _ = ctrl.start();
        let mut next_handle = 0;
        let mut phase = AppPhase::Active;

        for step in steps {
            apply(&mut ctrl, step, &mut next_handle, &mut phase);
            prop_assert_eq!(
                ctrl.mounted_subtree(),
                effective_subtree(ctrl.is_resetting_password(), ctrl.current_role())
            );
        }
    }

    #[test]
    fn prop_channels_scoped_to_current_session(steps in prop::collection::vec(step_strategy(), 0..40)) {
        let mut ctrl = Controller::marketplace();
        let _ = ctrl.start();
        let mut next_handle = 0;
        let mut phase = AppPhase::Active;

        for step in steps {
            apply(&mut ctrl, step, &mut next_handle, &mut phase);

            match ctrl.current_session() {
                None => prop_assert_eq!(ctrl.open_channel_count(), 0),
                Some(session) => {
                    let role = session.role();
                    let user = session.user_id().clone();
                    if phase == AppPhase::Background {
                        prop_assert_eq!(ctrl.open_channel_count(), 0);
                    }
                    for key in ctrl.open_channels() {
                        prop_assert_eq!(key.role, role);
                        prop_assert_eq!(&key.user_id, &user);
                    }
                },
            }
        }
    }

    #[test]
    fn prop_retries_never_exceed_budget(path in prop_oneof![
        Just("requests".to_string()),
        Just("requests/9".to_string()),
        Just("offers/1".to_string()),
    ]) {
        let mut ctrl = Controller::marketplace();
        let _ = ctrl.start();
        let _ = ctrl.handle(ControllerEvent::SessionChanged(Some(SessionPayload {
            user_id: UserId::new("u1"),
            role_claim: "client".to_string(),
            valid: true,
        })));

        let mut actions = ctrl.handle(ControllerEvent::DeepLink { path });
        let mut attempts = 0;

        while let [ControllerAction::AttemptNavigation { signal, .. }] = actions.as_slice() {
            attempts += 1;
            prop_assert!(attempts <= RetryPolicy::default().max_attempts);
            actions = ctrl.handle(ControllerEvent::NavigationNotReady { signal: signal.clone() });
        }

        prop_assert_eq!(attempts, RetryPolicy::default().max_attempts);
    }
}
