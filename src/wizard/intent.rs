//! Intents the presentation surface can send to the wizard

use super::analysis::TriageAnalysis;
use super::state::Severity;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    // User intents
    ToggleSymptom {
        symptom_id: String,
    },
    SetSearchFilter {
        filter: String,
    },
    SetSeverity {
        symptom_id: String,
        severity: Severity,
    },
    Advance,
    Retreat,
    Reset,

    // Analyzer events
    AnalysisComplete {
        run: u64,
        analysis: TriageAnalysis,
    },
    AnalysisFailed {
        run: u64,
        message: String,
    },
}

/// Payload-free discriminant used by the per-stage permission table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    ToggleSymptom,
    SetSearchFilter,
    SetSeverity,
    Advance,
    Retreat,
    Reset,
    AnalysisComplete,
    AnalysisFailed,
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::ToggleSymptom { .. } => IntentKind::ToggleSymptom,
            Intent::SetSearchFilter { .. } => IntentKind::SetSearchFilter,
            Intent::SetSeverity { .. } => IntentKind::SetSeverity,
            Intent::Advance => IntentKind::Advance,
            Intent::Retreat => IntentKind::Retreat,
            Intent::Reset => IntentKind::Reset,
            Intent::AnalysisComplete { .. } => IntentKind::AnalysisComplete,
            Intent::AnalysisFailed { .. } => IntentKind::AnalysisFailed,
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntentKind::ToggleSymptom => "toggle_symptom",
            IntentKind::SetSearchFilter => "set_search_filter",
            IntentKind::SetSeverity => "set_severity",
            IntentKind::Advance => "advance",
            IntentKind::Retreat => "retreat",
            IntentKind::Reset => "reset",
            IntentKind::AnalysisComplete => "analysis_complete",
            IntentKind::AnalysisFailed => "analysis_failed",
        })
    }
}
