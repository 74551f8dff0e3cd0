//! Mock implementations for testing
//!
//! These mocks enable runtime and API tests without network I/O.

use crate::generator::{GenerateError, Generation, GenerationRequest, ResponseGenerator};
use crate::wizard::{SelectedSymptom, SymptomAnalyzer, TriageAnalysis};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock Generator
// ============================================================================

/// Mock generator that returns queued responses
pub struct MockGenerator {
    responses: Mutex<VecDeque<Result<Generation, GenerateError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<GenerationRequest>>,
}

#[allow(dead_code)]
impl MockGenerator {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_response(&self, response: Result<Generation, GenerateError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn recorded_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GenerateError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerateError::transport("No mock response queued")))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// Delayed Mock Generator (for pending-guard testing)
// ============================================================================

/// Mock generator that holds every request for a fixed delay
pub struct DelayedMockGenerator {
    inner: MockGenerator,
    delay: Duration,
}

impl DelayedMockGenerator {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MockGenerator::new(),
            delay,
        }
    }

    pub fn queue_response(&self, response: Result<Generation, GenerateError>) {
        self.inner.queue_response(response);
    }

    pub fn request_count(&self) -> usize {
        self.inner.request_count()
    }
}

#[async_trait]
impl ResponseGenerator for DelayedMockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GenerateError> {
        self.inner.requests.lock().unwrap().push(request.clone());
        tokio::time::sleep(self.delay).await;
        self.inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerateError::transport("No mock response queued")))
    }

    fn name(&self) -> &str {
        "delayed-mock"
    }
}

// ============================================================================
// Panicking Generator
// ============================================================================

/// Generator whose call panics, standing in for a bug in a collaborator
pub struct PanickingGenerator;

#[async_trait]
impl ResponseGenerator for PanickingGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Generation, GenerateError> {
        panic!("generator exploded");
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

// ============================================================================
// Instant Analyzer
// ============================================================================

/// Analyzer that returns the standard result without waiting
pub struct InstantAnalyzer;

#[async_trait]
impl SymptomAnalyzer for InstantAnalyzer {
    async fn analyze(&self, _symptoms: &[SelectedSymptom]) -> TriageAnalysis {
        TriageAnalysis::standard()
    }
}

/// Analyzer whose call panics
pub struct PanickingAnalyzer;

#[async_trait]
impl SymptomAnalyzer for PanickingAnalyzer {
    async fn analyze(&self, _symptoms: &[SelectedSymptom]) -> TriageAnalysis {
        panic!("analyzer exploded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;

    fn request(text: &str) -> GenerationRequest {
        GenerationRequest {
            user_text: text.to_string(),
            category: Some(Category::Treatment),
            instruction: "be brief".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_generator() {
        let mock = MockGenerator::new();
        mock.queue_response(Ok(Generation::new("Hello")));

        let reply = mock.generate(&request("hi")).await.unwrap();
        assert_eq!(reply.text, "Hello");

        // Second call should fail (no more responses)
        let result = mock.generate(&request("again")).await;
        assert!(result.is_err());
        assert_eq!(mock.request_count(), 2);
        assert_eq!(mock.recorded_requests()[1].user_text, "again");
    }

    #[tokio::test]
    async fn test_delayed_mock_generator_waits() {
        let mock = DelayedMockGenerator::new(Duration::from_millis(20));
        mock.queue_response(Ok(Generation::new("later")));

        let start = tokio::time::Instant::now();
        let reply = mock.generate(&request("hi")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(reply.text, "later");
    }
}
