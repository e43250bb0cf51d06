use super::common::*;
use crate::grading::domain::GradingConfig;
use crate::grading::prediction::{
    predict, InfeasibleReason, PredictionOutcome, PredictionWarning, RequiredScore,
    ScenarioOption,
};
use crate::grading::rounding::RoundingMode;

#[test]
fn single_pending_assessment_reports_the_score_needed() {
    let records = vec![record("80", "100", "50"), pending("50")];

    let outcome = predict_default(&records, 70.0);

    match &outcome {
        PredictionOutcome::Scenarios(plan) => {
            assert!((plan.points_needed - 30.0).abs() < 1e-9);
            assert_eq!(plan.target_grade, "1st Class");
            assert_eq!(
                plan.options,
                vec![ScenarioOption::Single {
                    required: RequiredScore {
                        assessment: 2,
                        score: 60,
                        max_score: 100,
                    },
                    achievable: true,
                }]
            );
        }
        other => panic!("expected scenarios, got {other:?}"),
    }
    assert!(!outcome.celebrate());
    assert_eq!(
        outcome.messages(RoundingMode::Normal),
        vec![
            "To achieve 1st Class (70%), you need 30 more percentage points.".to_string(),
            "Assessment 2: You need to score 60 out of 100".to_string(),
        ]
    );
}

#[test]
fn weight_mismatch_short_circuits() {
    let records = vec![record("50", "100", "40"), pending("50")];

    let outcome = predict_default(&records, 60.0);

    match &outcome {
        PredictionOutcome::Warning(PredictionWarning::WeightMismatch { total_weight }) => {
            assert_eq!(*total_weight, 90.0);
        }
        other => panic!("expected weight warning, got {other:?}"),
    }
    assert!(outcome.is_warning());
    assert!(outcome.messages(RoundingMode::Normal)[0].starts_with("Total weight is 90%"));
}

#[test]
fn invalid_records_are_reported_before_any_arithmetic() {
    let records = vec![record("120", "100", "50"), pending("50")];

    match predict_default(&records, 60.0) {
        PredictionOutcome::Warning(PredictionWarning::InvalidAssessments { assessments }) => {
            assert_eq!(assessments, vec![1]);
        }
        other => panic!("expected invalid assessment warning, got {other:?}"),
    }
}

#[test]
fn already_met_target_triggers_celebration() {
    let records = vec![record("100", "100", "80"), pending("10"), pending("10")];

    let outcome = predict_default(&records, 70.0);

    match &outcome {
        PredictionOutcome::AlreadyMet {
            current_score,
            remaining,
            ..
        } => {
            assert!((current_score - 80.0).abs() < 1e-9);
            assert_eq!(*remaining, 2);
        }
        other => panic!("expected already met, got {other:?}"),
    }
    assert!(outcome.celebrate());
    assert!(outcome.options().is_empty());
    assert_eq!(
        outcome.messages(RoundingMode::Normal),
        vec!["Target of 1st Class already achieved with 80%!".to_string()]
    );
}

#[test]
fn completed_course_meeting_target_is_already_met() {
    let records = vec![record("100", "100", "100"), pending("0")];

    let outcome = predict_default(&records, 70.0);

    assert!(matches!(
        outcome,
        PredictionOutcome::AlreadyMet { remaining: 0, .. }
    ));
    assert_eq!(
        outcome.messages(RoundingMode::Normal),
        vec!["Target of 1st Class already met with 100%!".to_string()]
    );
}

#[test]
fn target_beyond_best_case_is_infeasible() {
    let records = vec![
        record("100", "100", "50"),
        record("0", "100", "40"),
        pending("10"),
    ];

    let outcome = predict_default(&records, 95.0);

    match &outcome {
        PredictionOutcome::Infeasible {
            target_grade,
            reason:
                InfeasibleReason::ExceedsMaximum {
                    max_possible,
                    max_possible_grade,
                },
            ..
        } => {
            assert_eq!(*target_grade, "1st Class");
            assert_eq!(*max_possible, 60.0);
            assert_eq!(*max_possible_grade, "2.1 Upper Class");
        }
        other => panic!("expected infeasible, got {other:?}"),
    }
    assert!(!outcome.celebrate());
    assert_eq!(
        outcome.messages(RoundingMode::Normal),
        vec![
            "Target of 1st Class (95%) cannot be achieved.".to_string(),
            "Maximum possible: 60% (2.1 Upper Class)".to_string(),
        ]
    );
}

#[test]
fn target_above_one_hundred_is_infeasible() {
    let outcome = predict_default(&[pending("100")], 120.0);
    assert!(matches!(outcome, PredictionOutcome::Infeasible { .. }));
}

#[test]
fn degenerate_record_sets_produce_weight_warnings() {
    assert!(matches!(
        predict_default(&[], 70.0),
        PredictionOutcome::Warning(PredictionWarning::WeightMismatch { .. })
    ));
    assert!(matches!(
        predict_default(&[pending("0"), record("50", "100", "0")], 70.0),
        PredictionOutcome::Warning(PredictionWarning::WeightMismatch { .. })
    ));
}

#[test]
fn multiple_pending_assessments_enumerate_options() {
    let records = vec![
        record("60", "100", "40"),
        record("", "50", "30"),
        pending("30"),
    ];

    let outcome = predict_default(&records, 60.0);

    assert_eq!(outcome.options().len(), 3);
    assert_eq!(
        outcome.messages(RoundingMode::Normal),
        vec![
            "To achieve 2.1 Upper Class (60%), you need 36 more percentage points.".to_string(),
            "Choose ONE of these options:".to_string(),
            "Option 1: Score 100% (50/50) on Assessment 2 AND 20/100 on Assessment 3".to_string(),
            "Option 2: Score 100% (100/100) on Assessment 3 AND 10/50 on Assessment 2"
                .to_string(),
            "Option (Equal Distribution): Score equally across all assessments: Assessment 2: 30/50; Assessment 3: 60/100"
                .to_string(),
        ]
    );
}

#[test]
fn rounding_mode_changes_required_scores() {
    // 10 points over weight 30 is 33.3%; of 100 marks that is 33.33.
    let records = vec![record("0", "100", "70"), pending("30")];

    let required = |mode: RoundingMode| {
        let config = GradingConfig {
            rounding: mode,
            ..GradingConfig::default()
        };
        match predict(&records, 10.0, &config) {
            PredictionOutcome::Scenarios(plan) => match &plan.options[0] {
                ScenarioOption::Single { required, .. } => required.score,
                other => panic!("expected single option, got {other:?}"),
            },
            other => panic!("expected scenarios, got {other:?}"),
        }
    };

    assert_eq!(required(RoundingMode::Up), 34);
    assert_eq!(required(RoundingMode::Down), 33);
    assert_eq!(required(RoundingMode::Normal), 33);
}

