//! Conversation state types

use crate::classifier::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Greeting seeded into every new session
pub const WELCOME_TEXT: &str =
    "Hello! I'm HealthPal, your AI health assistant. How can I help you today?";

/// Reply appended when the generator fails
pub const APOLOGY_TEXT: &str = "I'm sorry, I couldn't process your request right now. Please try again in a moment. If your concern is urgent, contact a healthcare professional.";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A message in the conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    /// Position in the history, assigned at append
    pub sequence_id: u64,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Session state: the single-flight guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionState {
    /// Ready for user input
    #[default]
    Idle,

    /// One generation request in flight
    Awaiting {
        request_id: u64,
        /// Category of the user message, attached to the reply on success
        category: Option<Category>,
    },
}

impl SessionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SessionState::Awaiting { .. })
    }
}

/// Context for a session (immutable configuration)
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub welcome_text: String,
    pub apology_text: String,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            welcome_text: WELCOME_TEXT.to_string(),
            apology_text: APOLOGY_TEXT.to_string(),
        }
    }
}
