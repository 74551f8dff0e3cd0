//! HTTP API for HealthPal
//!
//! A thin adapter over the runtimes: reads return snapshots, writes queue
//! intents, and streams relay runtime broadcasts as server-sent events.

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::{Engine, SessionHandle, WizardHandle};
use crate::wizard::SymptomCatalog;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    pub wizard: WizardHandle,
    pub catalog: Arc<SymptomCatalog>,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self {
            session: engine.session,
            wizard: engine.wizard,
            catalog: engine.catalog,
        }
    }
}
