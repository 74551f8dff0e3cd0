//! Triage wizard actor

use super::{RuntimeError, SseEvent};
use crate::wizard::{
    transition, Intent, SelectedSymptom, Severity, Symptom, SymptomAnalyzer, SymptomCatalog,
    TriageAnalysis, WizardEffect, WizardState,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// What the presentation surface renders for the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardSnapshot {
    pub stage: &'static str,
    pub selected: Vec<SelectedSymptom>,
    pub search_filter: String,
    pub analysis_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<TriageAnalysis>,
    /// Catalog entries matching the search filter
    pub visible_symptoms: Vec<Symptom>,
}

impl WizardSnapshot {
    fn capture(state: &WizardState, catalog: &SymptomCatalog) -> Self {
        Self {
            stage: state.stage.name(),
            selected: state.selected.clone(),
            search_filter: state.search_filter.clone(),
            analysis_ready: state.analysis_ready(),
            analysis: state.analysis().cloned(),
            visible_symptoms: catalog
                .filter(&state.search_filter)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

/// Handle to the running wizard
#[derive(Clone)]
pub struct WizardHandle {
    intent_tx: mpsc::Sender<Intent>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    state_rx: watch::Receiver<WizardState>,
    catalog: Arc<SymptomCatalog>,
}

impl WizardHandle {
    /// Spawn the wizard runtime on the current tokio runtime
    pub fn spawn(analyzer: Arc<dyn SymptomAnalyzer>, catalog: Arc<SymptomCatalog>) -> Self {
        let (intent_tx, intent_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let (state_tx, state_rx) = watch::channel(WizardState::new());

        let runtime = TriageRuntime {
            state: WizardState::new(),
            catalog: Arc::clone(&catalog),
            analyzer,
            intent_rx,
            intent_tx: intent_tx.clone(),
            broadcast_tx: broadcast_tx.clone(),
            state_tx,
        };
        tokio::spawn(runtime.run());

        Self {
            intent_tx,
            broadcast_tx,
            state_rx,
            catalog,
        }
    }

    pub async fn toggle_symptom(&self, symptom_id: impl Into<String>) -> Result<(), RuntimeError> {
        self.dispatch(Intent::ToggleSymptom {
            symptom_id: symptom_id.into(),
        })
        .await
    }

    pub async fn set_search_filter(&self, filter: impl Into<String>) -> Result<(), RuntimeError> {
        self.dispatch(Intent::SetSearchFilter {
            filter: filter.into(),
        })
        .await
    }

    pub async fn set_severity(
        &self,
        symptom_id: impl Into<String>,
        severity: Severity,
    ) -> Result<(), RuntimeError> {
        self.dispatch(Intent::SetSeverity {
            symptom_id: symptom_id.into(),
            severity,
        })
        .await
    }

    pub async fn advance(&self) -> Result<(), RuntimeError> {
        self.dispatch(Intent::Advance).await
    }

    pub async fn retreat(&self) -> Result<(), RuntimeError> {
        self.dispatch(Intent::Retreat).await
    }

    pub async fn reset(&self) -> Result<(), RuntimeError> {
        self.dispatch(Intent::Reset).await
    }

    async fn dispatch(&self, intent: Intent) -> Result<(), RuntimeError> {
        self.intent_tx
            .send(intent)
            .await
            .map_err(|_| RuntimeError::Closed("wizard"))
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot::capture(&self.state_rx.borrow(), &self.catalog)
    }

    /// Chat message summarising the finished run, if the analysis is ready
    pub fn handoff_message(&self) -> Option<String> {
        self.state_rx.borrow().handoff_message()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SseEvent> {
        self.broadcast_tx.subscribe()
    }
}

struct TriageRuntime {
    state: WizardState,
    catalog: Arc<SymptomCatalog>,
    analyzer: Arc<dyn SymptomAnalyzer>,
    intent_rx: mpsc::Receiver<Intent>,
    intent_tx: mpsc::Sender<Intent>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    state_tx: watch::Sender<WizardState>,
}

impl TriageRuntime {
    async fn run(mut self) {
        tracing::info!("Starting wizard runtime");

        while let Some(intent) = self.intent_rx.recv().await {
            self.process_intent(intent);
        }

        tracing::info!("Wizard runtime stopped");
    }

    fn process_intent(&mut self, intent: Intent) {
        let kind = intent.kind();
        let result = match transition(&self.state, &self.catalog, intent) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(intent = %kind, stage = self.state.stage.name(), error = %e, "Wizard intent rejected");
                return;
            }
        };

        let from = self.state.stage.name();
        self.state = result.new_state;
        if from != self.state.stage.name() {
            tracing::info!(from, to = self.state.stage.name(), "Wizard stage changed");
        }

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: WizardEffect) {
        match effect {
            WizardEffect::PublishState => {
                self.state_tx.send_replace(self.state.clone());
                let snapshot = WizardSnapshot::capture(&self.state, &self.catalog);
                let state_json = serde_json::to_value(&snapshot).unwrap_or(Value::Null);
                let _ = self
                    .broadcast_tx
                    .send(SseEvent::StateChange { state: state_json });
            }

            WizardEffect::NotifyError { message } => {
                tracing::warn!(error = %message, "Notifying surface of failure");
                let _ = self.broadcast_tx.send(SseEvent::Error { message });
            }

            WizardEffect::StartAnalysis { run, symptoms } => self.spawn_analysis(run, symptoms),
        }
    }

    /// Run the analyzer in the background. A panic inside the analyzer is
    /// reported as `AnalysisFailed` so the wizard never stays in a result
    /// stage without an analysis.
    fn spawn_analysis(&self, run: u64, symptoms: Vec<SelectedSymptom>) {
        let analyzer = Arc::clone(&self.analyzer);
        let intent_tx = self.intent_tx.clone();

        tokio::spawn(async move {
            tracing::info!(run, symptoms = symptoms.len(), "Starting analysis (background)");

            let call = tokio::spawn(async move { analyzer.analyze(&symptoms).await });
            let intent = match call.await {
                Ok(analysis) => Intent::AnalysisComplete { run, analysis },
                Err(join_error) => {
                    tracing::error!(run, error = %join_error, "Analyzer task failed");
                    Intent::AnalysisFailed {
                        run,
                        message: format!("analyzer task failed: {join_error}"),
                    }
                }
            };

            if intent_tx.send(intent).await.is_err() {
                tracing::warn!(run, "Wizard runtime gone before analysis settled");
            }
        });
    }
}
