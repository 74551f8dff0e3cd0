//! `OpenAI`-compatible chat completions generator

use super::{GenerateError, Generation, GenerationRequest, ResponseGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DIRECT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Replies are short conversational answers
const MAX_TOKENS: u32 = 600;

/// Generator backed by an `OpenAI`-compatible `chat/completions` endpoint
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiGenerator {
    pub fn new(
        api_key: String,
        model: impl Into<String>,
        gateway: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, GenerateError> {
        let base_url = match gateway {
            Some(gw) => format!("{}/openai/v1/chat/completions", gw.trim_end_matches('/')),
            None => DIRECT_URL.to_string(),
        };

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerateError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
            base_url,
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn translate_request(&self, request: &GenerationRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(request.instruction.clone()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(request.user_text.clone()),
                },
            ],
            max_tokens: Some(MAX_TOKENS),
        }
    }

    fn normalize_response(resp: ChatResponse) -> Result<Generation, GenerateError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerateError::upstream("No choices in response"))?;

        match choice.message.content {
            Some(text) if !text.trim().is_empty() => Ok(Generation::new(text.trim())),
            _ => Err(GenerateError::upstream("Empty completion")),
        }
    }

    /// Raw upstream bodies stay in the log; error messages reach clients.
    fn parse_body(body: &str) -> Result<Generation, GenerateError> {
        let chat_response: ChatResponse = serde_json::from_str(body).map_err(|e| {
            tracing::warn!(error = %e, body = %body, "Unparseable completion response");
            // serde messages can quote body fragments, so only the position is kept
            GenerateError::upstream(format!(
                "Failed to parse response: {:?} error at line {} column {}",
                e.classify(),
                e.line(),
                e.column()
            ))
        })?;
        Self::normalize_response(chat_response)
    }

    fn status_error(status: reqwest::StatusCode, body: &str) -> GenerateError {
        if let Ok(error_resp) = serde_json::from_str::<ChatErrorResponse>(body) {
            let message = error_resp.error.message;
            return GenerateError::upstream(match status.as_u16() {
                401 | 403 => format!("Authentication failed: {message}"),
                429 => format!("Rate limit exceeded: {message}"),
                500..=599 => format!("Server error: {message}"),
                _ => format!("HTTP {status}: {message}"),
            });
        }
        tracing::warn!(%status, body = %body, "Upstream error without JSON body");
        GenerateError::upstream(format!("HTTP {status} error"))
    }
}

#[async_trait]
impl ResponseGenerator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GenerateError> {
        let chat_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::transport(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    GenerateError::transport(format!("Connection failed: {e}"))
                } else {
                    GenerateError::transport(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        Self::parse_body(&body)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatErrorResponse {
    error: ChatError,
}

#[derive(Debug, Deserialize)]
struct ChatError {
    message: String,
}
