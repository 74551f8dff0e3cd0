//! Pure wizard transition function
//!
//! Every intent is checked against the stage's permission table before any
//! gate specific to the intent. Rejections leave the state untouched.

use super::catalog::SymptomCatalog;
use super::effect::WizardEffect;
use super::intent::{Intent, IntentKind};
use super::state::{SelectedSymptom, Stage, WizardState};
use thiserror::Error;

/// Result of a wizard transition
#[derive(Debug)]
pub struct WizardTransition {
    pub new_state: WizardState,
    pub effects: Vec<WizardEffect>,
}

impl WizardTransition {
    fn publish(state: WizardState) -> Self {
        Self {
            new_state: state,
            effects: vec![WizardEffect::PublishState],
        }
    }

    fn with_effect(mut self, effect: WizardEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Rejected intents
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("{intent} is not allowed while {stage}")]
    NotPermitted {
        stage: &'static str,
        intent: IntentKind,
    },
    #[error("Unknown symptom: {0}")]
    UnknownSymptom(String),
    #[error("Symptom {0} is not selected")]
    NotSelected(String),
    #[error("Select at least one symptom first")]
    NothingSelected,
    #[error("Severity missing for: {}", .0.join(", "))]
    SeverityMissing(Vec<String>),
    #[error("Analysis for run {received} arrived after the run ended")]
    StaleAnalysis { received: u64 },
}

pub fn transition(
    state: &WizardState,
    catalog: &SymptomCatalog,
    intent: Intent,
) -> Result<WizardTransition, WizardError> {
    let kind = intent.kind();
    if !state.stage.permits(kind) {
        return Err(WizardError::NotPermitted {
            stage: state.stage.name(),
            intent: kind,
        });
    }

    match intent {
        Intent::ToggleSymptom { symptom_id } => {
            let symptom = catalog
                .get(&symptom_id)
                .ok_or_else(|| WizardError::UnknownSymptom(symptom_id.clone()))?;

            let mut next = state.clone();
            if next.is_selected(&symptom_id) {
                next.selected.retain(|s| s.symptom.id != symptom_id);
            } else {
                next.selected.push(SelectedSymptom {
                    symptom: symptom.clone(),
                    severity: None,
                });
            }
            Ok(WizardTransition::publish(next))
        }

        Intent::SetSearchFilter { filter } => {
            let mut next = state.clone();
            next.search_filter = filter;
            Ok(WizardTransition::publish(next))
        }

        Intent::SetSeverity {
            symptom_id,
            severity,
        } => {
            let mut next = state.clone();
            let entry = next
                .selected
                .iter_mut()
                .find(|s| s.symptom.id == symptom_id)
                .ok_or(WizardError::NotSelected(symptom_id))?;
            entry.severity = Some(severity);
            Ok(WizardTransition::publish(next))
        }

        Intent::Advance => match state.stage {
            Stage::Selecting => {
                if state.selected.is_empty() {
                    return Err(WizardError::NothingSelected);
                }
                let mut next = state.clone();
                next.stage = Stage::Reviewing;
                Ok(WizardTransition::publish(next))
            }
            Stage::Reviewing => {
                let unrated = state.unrated();
                if !unrated.is_empty() {
                    return Err(WizardError::SeverityMissing(
                        unrated.into_iter().map(String::from).collect(),
                    ));
                }
                let mut next = state.clone();
                let run = state.runs_started + 1;
                next.runs_started = run;
                next.stage = Stage::Result {
                    run,
                    analysis: None,
                };
                let symptoms = next.selected.clone();
                Ok(WizardTransition::publish(next)
                    .with_effect(WizardEffect::StartAnalysis { run, symptoms }))
            }
            // excluded by the permission table
            Stage::Result { .. } => Err(WizardError::NotPermitted {
                stage: state.stage.name(),
                intent: kind,
            }),
        },

        Intent::Retreat => {
            let mut next = state.clone();
            next.stage = Stage::Selecting;
            Ok(WizardTransition::publish(next))
        }

        Intent::Reset => Ok(WizardTransition::publish(WizardState {
            runs_started: state.runs_started,
            ..WizardState::default()
        })),

        Intent::AnalysisComplete { run, analysis } => match &state.stage {
            Stage::Result {
                run: current,
                analysis: None,
            } if *current == run => {
                let mut next = state.clone();
                next.stage = Stage::Result {
                    run,
                    analysis: Some(analysis),
                };
                Ok(WizardTransition::publish(next))
            }
            _ => Err(WizardError::StaleAnalysis { received: run }),
        },

        // Back to review with ratings intact so the user can retry
        Intent::AnalysisFailed { run, message } => match &state.stage {
            Stage::Result {
                run: current,
                analysis: None,
            } if *current == run => {
                let mut next = state.clone();
                next.stage = Stage::Reviewing;
                Ok(WizardTransition::publish(next).with_effect(WizardEffect::NotifyError {
                    message: format!("Symptom analysis failed: {message}"),
                }))
            }
            _ => Err(WizardError::StaleAnalysis { received: run }),
        },
    }
}
