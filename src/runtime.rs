//! Runtime for the chat session and the triage wizard
//!
//! Each component runs as an actor: intents arrive on an `mpsc` queue, the
//! pure transition decides, and effects are executed here. Observers read the
//! latest state through a `watch` channel and follow changes over `broadcast`.

mod chat;
mod triage;

#[cfg(test)]
pub mod testing;

pub use chat::{SessionHandle, SessionSnapshot};
pub use triage::{WizardHandle, WizardSnapshot};

use crate::config::AppConfig;
use crate::generator::{self, ResponseGenerator};
use crate::session::SessionContext;
use crate::wizard::{FixedAnalyzer, SymptomAnalyzer, SymptomCatalog};
use std::sync::Arc;
use thiserror::Error;

/// Events sent to SSE clients
#[derive(Debug, Clone)]
pub enum SseEvent {
    Init {
        snapshot: serde_json::Value,
    },
    Message {
        message: serde_json::Value,
    },
    StateChange {
        /// Full state as JSON object (e.g., `{"type":"awaiting","request_id":3}`)
        state: serde_json::Value,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("{0} runtime is not running")]
    Closed(&'static str),
}

/// Both runtimes plus the catalog they share
#[derive(Clone)]
pub struct Engine {
    pub session: SessionHandle,
    pub wizard: WizardHandle,
    pub catalog: Arc<SymptomCatalog>,
}

impl Engine {
    /// Start the runtimes described by configuration
    pub fn start(config: &AppConfig) -> Self {
        let generator = generator::from_config(&config.generator);
        let analyzer = Arc::new(FixedAnalyzer::new(config.analysis_delay));
        Self::with_parts(generator, analyzer, SymptomCatalog::standard())
    }

    /// Start the runtimes with explicit collaborators. Must be called from
    /// within a tokio runtime.
    pub fn with_parts(
        generator: Arc<dyn ResponseGenerator>,
        analyzer: Arc<dyn SymptomAnalyzer>,
        catalog: SymptomCatalog,
    ) -> Self {
        let catalog = Arc::new(catalog);
        tracing::info!(
            generator = %generator.name(),
            symptoms = catalog.all().len(),
            "Starting runtimes"
        );
        Self {
            session: SessionHandle::spawn(generator, SessionContext::default()),
            wizard: WizardHandle::spawn(analyzer, Arc::clone(&catalog)),
            catalog,
        }
    }
}
