//! Pure state transition function
//!
//! Given the same state and event this always yields the same new state and
//! effects. Message ids, timestamps and the generator call live in the
//! runtime.

use super::{Effect, Event, SessionContext, SessionState};
use crate::classifier::classify;
use crate::generator::{build_instruction, GenerationRequest};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Rejected events. None of these change state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("A request is already pending (request {0})")]
    RequestPending(u64),
    #[error("Response for request {received} does not match the outstanding request")]
    StaleResponse { received: u64 },
}

pub fn transition(
    state: &SessionState,
    context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User messages
        // ============================================================
        (_, Event::UserMessage { text, .. }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyMessage)
        }

        (SessionState::Idle, Event::UserMessage { text, request_id }) => {
            let category = classify(&text);
            let request = GenerationRequest {
                user_text: text.clone(),
                category,
                instruction: build_instruction(category),
            };
            Ok(TransitionResult::new(SessionState::Awaiting {
                request_id,
                category,
            })
            .with_effect(Effect::append_user_message(text))
            .with_effect(Effect::PublishState)
            .with_effect(Effect::RequestGeneration {
                request_id,
                request,
            }))
        }

        (SessionState::Awaiting { request_id, .. }, Event::UserMessage { .. }) => {
            Err(TransitionError::RequestPending(*request_id))
        }

        // ============================================================
        // Generator settle
        // ============================================================
        (
            SessionState::Awaiting {
                request_id,
                category,
            },
            Event::GenerationComplete {
                request_id: received,
                text,
            },
        ) if *request_id == received => Ok(TransitionResult::new(SessionState::Idle)
            .with_effect(Effect::append_assistant_message(text, *category))
            .with_effect(Effect::PublishState)),

        (
            SessionState::Awaiting { request_id, .. },
            Event::GenerationFailed {
                request_id: received,
                error,
            },
        ) if *request_id == received => Ok(TransitionResult::new(SessionState::Idle)
            .with_effect(Effect::append_assistant_message(
                context.apology_text.clone(),
                None,
            ))
            .with_effect(Effect::notify_error(format!(
                "Failed to get a response: {error}"
            )))
            .with_effect(Effect::PublishState)),

        (
            _,
            Event::GenerationComplete {
                request_id: received,
                ..
            }
            | Event::GenerationFailed {
                request_id: received,
                ..
            },
        ) => Err(TransitionError::StaleResponse { received }),
    }
}
