//! Triage analysis result and the analyzer boundary

use super::state::SelectedSymptom;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const DISCLAIMER: &str = "This analysis is not a medical diagnosis. Always consult with a healthcare professional for proper evaluation.";

/// How well a condition matches the reported symptoms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLevel {
    High,
    Moderate,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCondition {
    pub name: String,
    pub match_level: MatchLevel,
}

/// Ranked conditions plus next steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageAnalysis {
    /// Most likely first
    pub conditions: Vec<CandidateCondition>,
    pub recommendations: Vec<String>,
    pub disclaimer: String,
}

impl TriageAnalysis {
    /// The fixed result returned by [`FixedAnalyzer`]
    pub fn standard() -> Self {
        let condition = |name: &str, match_level| CandidateCondition {
            name: name.to_string(),
            match_level,
        };
        Self {
            conditions: vec![
                condition("Common Cold", MatchLevel::High),
                condition("Seasonal Allergies", MatchLevel::Moderate),
                condition("Flu (Influenza)", MatchLevel::Low),
            ],
            recommendations: vec![
                "Rest and stay hydrated".to_string(),
                "Monitor your symptoms for 24-48 hours".to_string(),
                "If symptoms worsen or persist, consult a healthcare provider".to_string(),
            ],
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    pub fn top_condition(&self) -> Option<&CandidateCondition> {
        self.conditions.first()
    }
}

/// Boundary to a diagnosis/analysis backend
#[async_trait]
pub trait SymptomAnalyzer: Send + Sync {
    async fn analyze(&self, symptoms: &[SelectedSymptom]) -> TriageAnalysis;
}

#[async_trait]
impl<T: SymptomAnalyzer + ?Sized> SymptomAnalyzer for Arc<T> {
    async fn analyze(&self, symptoms: &[SelectedSymptom]) -> TriageAnalysis {
        (**self).analyze(symptoms).await
    }
}

/// Simulated backend: waits, then returns the standard result
#[derive(Debug, Clone)]
pub struct FixedAnalyzer {
    delay: Duration,
}

impl FixedAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SymptomAnalyzer for FixedAnalyzer {
    async fn analyze(&self, symptoms: &[SelectedSymptom]) -> TriageAnalysis {
        tracing::debug!(count = symptoms.len(), delay_ms = %self.delay.as_millis(), "Analyzing symptoms");
        tokio::time::sleep(self.delay).await;
        TriageAnalysis::standard()
    }
}
