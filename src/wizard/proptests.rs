//! Property-based tests for the triage wizard
//!
//! Random intent streams are applied in order; accepted intents must keep the
//! stage invariants and the permission table must agree with every outcome.

use super::analysis::TriageAnalysis;
use super::catalog::SymptomCatalog;
use super::effect::WizardEffect;
use super::intent::Intent;
use super::state::{Severity, Stage, WizardState};
use super::transition::{transition, WizardError};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_symptom_id() -> impl Strategy<Value = String> {
    prop_oneof![
        9 => (1u32..=10).prop_map(|n| n.to_string()),
        1 => Just("42".to_string()),
    ]
}

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Mild),
        Just(Severity::Moderate),
        Just(Severity::Severe),
    ]
}

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        4 => arb_symptom_id().prop_map(|symptom_id| Intent::ToggleSymptom { symptom_id }),
        1 => "[a-z ]{0,6}".prop_map(|filter| Intent::SetSearchFilter { filter }),
        4 => (arb_symptom_id(), arb_severity())
            .prop_map(|(symptom_id, severity)| Intent::SetSeverity { symptom_id, severity }),
        3 => Just(Intent::Advance),
        1 => Just(Intent::Retreat),
        1 => Just(Intent::Reset),
        1 => (0u64..4).prop_map(|run| Intent::AnalysisComplete {
            run,
            analysis: TriageAnalysis::standard(),
        }),
        1 => (0u64..4).prop_map(|run| Intent::AnalysisFailed {
            run,
            message: "unavailable".to_string(),
        }),
    ]
}

fn check_invariants(state: &WizardState) -> Result<(), TestCaseError> {
    let mut ids: Vec<&str> = state.selected.iter().map(|s| s.symptom.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    prop_assert_eq!(ids.len(), state.selected.len(), "duplicate selection");

    match &state.stage {
        Stage::Selecting => {}
        Stage::Reviewing => prop_assert!(!state.selected.is_empty()),
        Stage::Result { run, .. } => {
            prop_assert!(!state.selected.is_empty());
            prop_assert!(state.unrated().is_empty());
            prop_assert_eq!(*run, state.runs_started);
        }
    }
    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Stage invariants hold after every intent, accepted or not
    #[test]
    fn prop_stage_invariants(intents in prop::collection::vec(arb_intent(), 0..40)) {
        let catalog = SymptomCatalog::standard();
        let mut state = WizardState::new();
        for intent in intents {
            if let Ok(result) = transition(&state, &catalog, intent) {
                state = result.new_state;
            }
            check_invariants(&state)?;
        }
    }

    /// The per-stage table alone decides whether an intent kind may run:
    /// excluded kinds fail with `NotPermitted`, accepted intents were allowed,
    /// and only an accepted advance out of review starts an analysis.
    #[test]
    fn prop_permission_table_decides(
        setup in prop::collection::vec(arb_intent(), 0..20),
        intent in arb_intent(),
    ) {
        let catalog = SymptomCatalog::standard();
        let mut state = WizardState::new();
        for step in setup {
            if let Ok(result) = transition(&state, &catalog, step) {
                state = result.new_state;
            }
        }

        let kind = intent.kind();
        let permitted = state.stage.permits(kind);
        match transition(&state, &catalog, intent) {
            Ok(result) => {
                prop_assert!(permitted, "{} accepted while {}", kind, state.stage.name());
                let analysis_started = result
                    .effects
                    .iter()
                    .any(|e| matches!(e, WizardEffect::StartAnalysis { .. }));
                let entered_result = state.stage == Stage::Reviewing
                    && matches!(result.new_state.stage, Stage::Result { .. });
                prop_assert_eq!(analysis_started, entered_result);
            }
            Err(WizardError::NotPermitted { stage, intent }) => {
                prop_assert!(!permitted);
                prop_assert_eq!(stage, state.stage.name());
                prop_assert_eq!(intent, kind);
            }
            Err(_) => prop_assert!(permitted),
        }
    }

    /// Reset always lands on an empty Selecting stage
    #[test]
    fn prop_reset_clears(setup in prop::collection::vec(arb_intent(), 0..30)) {
        let catalog = SymptomCatalog::standard();
        let mut state = WizardState::new();
        for step in setup {
            if let Ok(result) = transition(&state, &catalog, step) {
                state = result.new_state;
            }
        }
        let runs = state.runs_started;
        let reset = transition(&state, &catalog, Intent::Reset).unwrap().new_state;
        prop_assert_eq!(&reset.stage, &Stage::Selecting);
        prop_assert!(reset.selected.is_empty());
        prop_assert!(reset.search_filter.is_empty());
        prop_assert!(!reset.analysis_ready());
        prop_assert_eq!(reset.runs_started, runs);
    }
}
