//! Response generator abstraction
//!
//! The boundary to the external text-generation service. The session only
//! sees the trait; the concrete client is chosen from configuration.

mod canned;
mod error;
mod instructions;
mod openai;

pub use canned::CannedGenerator;
pub use error::GenerateError;
#[cfg(test)]
pub use error::GenerateErrorKind;
pub use instructions::build_instruction;
pub use openai::OpenAiGenerator;

use crate::classifier::Category;
use crate::config::GeneratorConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Input to a generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub user_text: String,
    pub category: Option<Category>,
    /// Category-specific instruction framing
    pub instruction: String,
}

/// Generated reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
}

impl Generation {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Common interface for text generation services
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Produce a reply for one user message
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GenerateError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: ResponseGenerator + ?Sized> ResponseGenerator for Arc<T> {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GenerateError> {
        (**self).generate(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Logging wrapper for generators
pub struct LoggingGenerator {
    inner: Arc<dyn ResponseGenerator>,
    name: String,
}

impl LoggingGenerator {
    pub fn new(inner: Arc<dyn ResponseGenerator>) -> Self {
        let name = inner.name().to_string();
        Self { inner, name }
    }
}

#[async_trait]
impl ResponseGenerator for LoggingGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GenerateError> {
        let start = std::time::Instant::now();
        let result = self.inner.generate(request).await;
        let duration = start.elapsed();
        let category = request.category.map_or("none", |c| c.as_str());

        match &result {
            Ok(generation) => {
                tracing::info!(
                    generator = %self.name,
                    category,
                    duration_ms = %duration.as_millis(),
                    reply_chars = generation.text.chars().count(),
                    "Generation completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    generator = %self.name,
                    category,
                    duration_ms = %duration.as_millis(),
                    kind = %e.kind,
                    error = %e.message,
                    "Generation failed"
                );
            }
        }

        result
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Build the generator described by configuration.
///
/// Falls back to the canned generator when no key or gateway is set, or
/// when the HTTP client cannot be constructed.
pub fn from_config(config: &GeneratorConfig) -> Arc<dyn ResponseGenerator> {
    let api_key = match (&config.api_key, &config.gateway) {
        (Some(key), _) if !key.is_empty() => Some(key.clone()),
        // The gateway handles authentication
        (_, Some(_)) => Some("implicit".to_string()),
        _ => None,
    };

    let Some(api_key) = api_key else {
        tracing::warn!("No generator configured. Set OPENAI_API_KEY or LLM_GATEWAY; using canned replies.");
        return Arc::new(LoggingGenerator::new(Arc::new(CannedGenerator)));
    };

    match OpenAiGenerator::new(
        api_key,
        config.model.clone(),
        config.gateway.as_deref(),
        config.request_timeout,
    ) {
        Ok(generator) => {
            tracing::info!(model = %config.model, gateway = ?config.gateway, "Generator initialized");
            Arc::new(LoggingGenerator::new(Arc::new(generator)))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build generator; using canned replies");
            Arc::new(LoggingGenerator::new(Arc::new(CannedGenerator)))
        }
    }
}
