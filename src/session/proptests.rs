//! Property-based tests for the session state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::generator::GenerateError;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::Idle),
        (1u64..100).prop_map(|request_id| SessionState::Awaiting {
            request_id,
            category: None,
        }),
    ]
}

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,8}"
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z ]{0,30}"
}

fn arb_error() -> impl Strategy<Value = GenerateError> {
    prop_oneof![
        "[a-z ]{1,20}".prop_map(GenerateError::transport),
        "[a-z ]{1,20}".prop_map(GenerateError::upstream),
    ]
}

/// Intent stream driving a session
#[derive(Debug, Clone)]
enum Step {
    Send(String),
    Succeed(String),
    Fail(GenerateError),
    /// Reply for a request id that is never outstanding
    Stray(u64),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => prop_oneof![arb_text(), arb_blank()].prop_map(Step::Send),
        2 => arb_text().prop_map(Step::Succeed),
        1 => arb_error().prop_map(Step::Fail),
        1 => (1000u64..2000).prop_map(Step::Stray),
    ]
}

/// Outstanding request id, or 0 (never issued) when idle
fn outstanding(state: &SessionState) -> u64 {
    match state {
        SessionState::Awaiting { request_id, .. } => *request_id,
        SessionState::Idle => 0,
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Blank text is rejected in every state and never produces effects
    #[test]
    fn prop_blank_message_rejected(state in arb_state(), text in arb_blank(), id in 1u64..100) {
        let result = transition(
            &state,
            &SessionContext::default(),
            Event::UserMessage { text, request_id: id },
        );
        prop_assert_eq!(result.unwrap_err(), TransitionError::EmptyMessage);
    }

    /// While a request is pending, every new message is rejected
    #[test]
    fn prop_pending_blocks_send(outstanding in 1u64..100, text in arb_text(), id in 1u64..100) {
        let state = SessionState::Awaiting { request_id: outstanding, category: None };
        let result = transition(
            &state,
            &SessionContext::default(),
            Event::UserMessage { text, request_id: id },
        );
        prop_assert_eq!(result.unwrap_err(), TransitionError::RequestPending(outstanding));
    }

    /// A matching settle always returns to idle with exactly one assistant message
    #[test]
    fn prop_settle_clears_pending(
        request_id in 1u64..100,
        outcome in prop_oneof![
            arb_text().prop_map(Ok::<String, GenerateError>),
            arb_error().prop_map(Err::<String, GenerateError>),
        ],
    ) {
        let state = SessionState::Awaiting { request_id, category: None };
        let event = match outcome {
            Ok(text) => Event::GenerationComplete { request_id, text },
            Err(error) => Event::GenerationFailed { request_id, error },
        };
        let result = transition(&state, &SessionContext::default(), event).unwrap();

        prop_assert_eq!(result.new_state, SessionState::Idle);
        let appended: Vec<_> = result
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::AppendMessage { role, .. } => Some(*role),
                _ => None,
            })
            .collect();
        prop_assert_eq!(appended, vec![Role::Assistant]);
        let spawned = result
            .effects
            .iter()
            .any(|e| matches!(e, Effect::RequestGeneration { .. }));
        prop_assert!(!spawned);
    }

    /// Driving the machine with any step sequence keeps history well-formed:
    /// user/assistant pairs in order, and pending only between them.
    #[test]
    fn prop_history_pairs_stay_ordered(steps in proptest::collection::vec(arb_step(), 0..40)) {
        let context = SessionContext::default();
        let mut state = SessionState::Idle;
        let mut roles: Vec<Role> = Vec::new();
        let mut next_id = 0u64;

        for step in steps {
            let event = match step {
                Step::Send(text) => {
                    next_id += 1;
                    Event::UserMessage { text, request_id: next_id }
                }
                Step::Succeed(text) => Event::GenerationComplete {
                    request_id: outstanding(&state),
                    text,
                },
                Step::Fail(error) => Event::GenerationFailed {
                    request_id: outstanding(&state),
                    error,
                },
                Step::Stray(request_id) => Event::GenerationComplete {
                    request_id,
                    text: "stray".to_string(),
                },
            };

            let before = roles.len();
            let was_pending = state.is_pending();
            match transition(&state, &context, event) {
                Ok(result) => {
                    for effect in &result.effects {
                        if let Effect::AppendMessage { role, .. } = effect {
                            roles.push(*role);
                        }
                    }
                    state = result.new_state;
                }
                Err(_) => {
                    prop_assert_eq!(roles.len(), before);
                    prop_assert_eq!(state.is_pending(), was_pending);
                }
            }

            // pending exactly when the last message is an unanswered user message
            prop_assert_eq!(state.is_pending(), roles.last() == Some(&Role::User));
        }

        for pair in roles.chunks(2) {
            prop_assert_eq!(pair[0], Role::User);
            if pair.len() == 2 {
                prop_assert_eq!(pair[1], Role::Assistant);
            }
        }
    }
}
