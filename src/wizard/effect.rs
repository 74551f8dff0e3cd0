//! Effects produced by wizard transitions

use super::state::SelectedSymptom;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    /// Kick off the analyzer for this run (spawns as background task)
    StartAnalysis {
        run: u64,
        symptoms: Vec<SelectedSymptom>,
    },

    /// Transient notification for the presentation surface
    NotifyError { message: String },

    /// Publish the new state to observers
    PublishState,
}
