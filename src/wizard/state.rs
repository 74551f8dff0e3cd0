//! Triage wizard state types

use super::analysis::TriageAnalysis;
use super::catalog::Symptom;
use super::intent::IntentKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write;

/// User-assigned rating for a selected symptom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        })
    }
}

/// A symptom the user picked, with its rating once set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSymptom {
    pub symptom: Symptom,
    pub severity: Option<Severity>,
}

/// Position in the three-step flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    /// Picking symptoms from the catalog
    #[default]
    Selecting,

    /// Rating each selected symptom
    Reviewing,

    /// Terminal until reset
    Result {
        /// Analysis run this stage is waiting on
        run: u64,
        /// Present once the analysis has completed
        analysis: Option<TriageAnalysis>,
    },
}

const SELECTING_INTENTS: &[IntentKind] = &[
    IntentKind::ToggleSymptom,
    IntentKind::SetSearchFilter,
    IntentKind::Advance,
    IntentKind::Reset,
];

const REVIEWING_INTENTS: &[IntentKind] = &[
    IntentKind::SetSeverity,
    IntentKind::Advance,
    IntentKind::Retreat,
    IntentKind::Reset,
];

const RESULT_INTENTS: &[IntentKind] = &[
    IntentKind::AnalysisComplete,
    IntentKind::AnalysisFailed,
    IntentKind::Reset,
];

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Selecting => "selecting",
            Stage::Reviewing => "reviewing",
            Stage::Result { .. } => "result",
        }
    }

    /// Intents accepted in this stage
    pub fn permitted_intents(&self) -> &'static [IntentKind] {
        match self {
            Stage::Selecting => SELECTING_INTENTS,
            Stage::Reviewing => REVIEWING_INTENTS,
            Stage::Result { .. } => RESULT_INTENTS,
        }
    }

    pub fn permits(&self, intent: IntentKind) -> bool {
        self.permitted_intents().contains(&intent)
    }
}

/// Full wizard state for one triage run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WizardState {
    pub stage: Stage,
    /// Unique per symptom id, in selection order
    pub selected: Vec<SelectedSymptom>,
    pub search_filter: String,
    /// Analysis runs started so far; survives reset so late results can be
    /// told apart from the current run
    pub runs_started: u64,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analysis(&self) -> Option<&TriageAnalysis> {
        match &self.stage {
            Stage::Result { analysis, .. } => analysis.as_ref(),
            _ => None,
        }
    }

    pub fn analysis_ready(&self) -> bool {
        self.analysis().is_some()
    }

    pub fn selection(&self, symptom_id: &str) -> Option<&SelectedSymptom> {
        self.selected.iter().find(|s| s.symptom.id == symptom_id)
    }

    pub fn is_selected(&self, symptom_id: &str) -> bool {
        self.selection(symptom_id).is_some()
    }

    /// Names of selected symptoms that still lack a severity
    pub fn unrated(&self) -> Vec<&str> {
        self.selected
            .iter()
            .filter(|s| s.severity.is_none())
            .map(|s| s.symptom.name.as_str())
            .collect()
    }

    /// Chat message summarising a finished run, for handing off to the
    /// conversation. `None` until the analysis is ready.
    pub fn handoff_message(&self) -> Option<String> {
        let analysis = self.analysis()?;
        let reported = self
            .selected
            .iter()
            .map(|s| match s.severity {
                Some(severity) => format!("{} ({severity})", s.symptom.name),
                None => s.symptom.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut message =
            format!("I used the symptom checker and reported these symptoms: {reported}.");
        if let Some(top) = analysis.top_condition() {
            let _ = write!(message, " The closest match was {}.", top.name);
        }
        message.push_str(" What should I do next?");
        Some(message)
    }
}
