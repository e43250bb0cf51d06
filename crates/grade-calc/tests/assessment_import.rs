use std::io::Cursor;

use grade_calc::grading::{
    aggregate, predict, read_assessments, AssessmentImportError, GradingConfig, PredictionOutcome,
    RoundingMode,
};

const COURSE_CSV: &str = "score,max_score,weight\n\
45,60,25\n\
18,20,15\n\
,80,35\n\
,,25\n";

#[test]
fn imported_course_aggregates_and_predicts() {
    let inputs = read_assessments(Cursor::new(COURSE_CSV), 6).expect("csv parses");
    assert_eq!(inputs.len(), 4);
    assert_eq!(inputs[3].max_score, "100");

    let totals = aggregate(&inputs);
    assert_eq!(totals.total_weight, 100.0);
    assert!(!totals.has_errors);
    // 45/60 of 25 plus 18/20 of 15.
    assert!((totals.total_weighted_score - 32.25).abs() < 1e-9);

    let config = GradingConfig {
        rounding: RoundingMode::Up,
        ..GradingConfig::default()
    };
    let outcome = predict(&inputs, 70.0, &config);

    match &outcome {
        PredictionOutcome::Scenarios(plan) => {
            assert_eq!(plan.options.len(), 3);
            assert!(plan.options.iter().any(|option| option.is_achievable()));
        }
        other => panic!("expected scenarios, got {other:?}"),
    }
    assert_eq!(
        outcome.messages(config.rounding)[0],
        "To achieve 1st Class (70%), you need 38 more percentage points."
    );
}

#[test]
fn oversized_csv_is_rejected() {
    let mut csv = String::from("score,max_score,weight\n");
    for _ in 0..7 {
        csv.push_str(",100,10\n");
    }

    let err = read_assessments(Cursor::new(csv), 6).expect_err("seven rows exceed the cap");
    assert!(matches!(
        err,
        AssessmentImportError::TooManyAssessments { limit: 6, found: 7 }
    ));
}

#[test]
fn malformed_csv_surfaces_the_parser_error() {
    let csv = "score,max_score,weight\n1,2\n";
    let err = read_assessments(Cursor::new(csv), 6).expect_err("ragged row");
    assert!(matches!(err, AssessmentImportError::Csv(_)));
}
