//! Symptom triage wizard
//!
//! A three-stage flow (select symptoms, rate them, view the analysis) driven
//! by a pure transition function over explicit stages.

pub mod analysis;
pub mod catalog;
mod effect;
pub mod intent;
pub mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use analysis::{FixedAnalyzer, SymptomAnalyzer, TriageAnalysis};
pub use catalog::{Symptom, SymptomCatalog};
pub use effect::WizardEffect;
pub use intent::Intent;
pub use state::{SelectedSymptom, Severity, WizardState};
pub use transition::transition;
