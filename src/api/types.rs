//! API request and response types

use crate::wizard::{Severity, Symptom};
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Request to toggle a symptom in the wizard selection
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub symptom_id: String,
}

/// Request to change the catalog search filter
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub filter: String,
}

/// Request to rate a selected symptom
#[derive(Debug, Deserialize)]
pub struct SeverityRequest {
    pub symptom_id: String,
    pub severity: Severity,
}

/// Query for catalog search
#[derive(Debug, Deserialize)]
pub struct SymptomsQuery {
    #[serde(default)]
    pub q: String,
}

/// Response with catalog entries
#[derive(Debug, Serialize)]
pub struct SymptomsResponse {
    pub symptoms: Vec<Symptom>,
}

/// Response for any queued intent
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

impl QueuedResponse {
    pub fn queued() -> Self {
        Self { queued: true }
    }
}

/// Response for the wizard hand-off
#[derive(Debug, Serialize)]
pub struct HandoffResponse {
    pub queued: bool,
    pub message: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
