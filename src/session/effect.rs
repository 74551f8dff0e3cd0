//! Effects produced by session transitions

use super::state::Role;
use crate::classifier::Category;
use crate::generator::GenerationRequest;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a message to the history
    AppendMessage {
        role: Role,
        text: String,
        category: Option<Category>,
    },

    /// Call the response generator (spawns as background task)
    RequestGeneration {
        request_id: u64,
        request: GenerationRequest,
    },

    /// Transient notification for the presentation surface
    NotifyError { message: String },

    /// Publish the new state to observers
    PublishState,
}

impl Effect {
    pub fn append_user_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            role: Role::User,
            text: text.into(),
            category: None,
        }
    }

    pub fn append_assistant_message(text: impl Into<String>, category: Option<Category>) -> Self {
        Effect::AppendMessage {
            role: Role::Assistant,
            text: text.into(),
            category,
        }
    }

    pub fn notify_error(message: impl Into<String>) -> Self {
        Effect::NotifyError {
            message: message.into(),
        }
    }
}
