use crate::render::{render_prediction, render_view};
use clap::Args;
use grade_calc::config::GradingSettings;
use grade_calc::error::AppError;
use grade_calc::grading::{
    AssessmentInput, GradeClass, GradeSession, SessionError, SessionEvent, SessionView,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the target prediction walkthrough
    #[arg(long)]
    pub(crate) skip_prediction: bool,
}

pub(crate) fn run_demo(args: DemoArgs, settings: &GradingSettings) -> Result<(), AppError> {
    let mut session = GradeSession::new(settings.grading_config(), settings.max_assessments);
    let first = session.assessment_ids()[0];

    println!("Grade calculator demo");

    step(
        &mut session,
        "Coursework marked 80/100 at 50% weight, exam still to sit",
        vec![
            SessionEvent::EditScore {
                id: first,
                value: "80".to_string(),
            },
            SessionEvent::EditWeight {
                id: first,
                value: "50".to_string(),
            },
            SessionEvent::add("", "100", "50"),
        ],
    )?;

    let boundaries = session.config().boundaries;
    if !args.skip_prediction {
        step(
            &mut session,
            "What does the exam need for a 1st?",
            vec![
                SessionEvent::SelectTarget {
                    value: boundaries.first,
                },
                SessionEvent::CalculateTarget,
            ],
        )?;
    }

    let exam = session.assessment_ids()[1];
    step(
        &mut session,
        "Split the exam into two papers worth 25% each",
        vec![
            SessionEvent::EditWeight {
                id: exam,
                value: "25".to_string(),
            },
            SessionEvent::add("", "60", "25"),
        ],
    )?;

    if !args.skip_prediction {
        step(
            &mut session,
            "Options for a 2.1 across the two papers",
            vec![
                SessionEvent::SelectTarget {
                    value: boundaries.upper_second,
                },
                SessionEvent::CalculateTarget,
            ],
        )?;
    }

    step(
        &mut session,
        "Department raises the 2.1 boundary to 65",
        vec![SessionEvent::SetBoundary {
            class: GradeClass::UpperSecond,
            value: 65,
        }],
    )?;

    if !args.skip_prediction {
        for (title, rows, target) in outcome_scenarios(settings) {
            println!("\n== {title}");
            match outcome_session(settings, rows, target) {
                Ok(view) => {
                    render_view(&view);
                    if let Some(prediction) = &view.prediction {
                        render_prediction(prediction);
                    }
                }
                Err(err) => println!("  skipped: {err}"),
            }
        }
    }

    println!("\n== Filling a fresh session with zero-weight assessments");
    let mut capped = GradeSession::with_assessments(
        settings.grading_config(),
        settings.max_assessments,
        Vec::new(),
    )?;
    if let Some(err) = fill_to_cap(&mut capped) {
        println!(
            "  rejected after {} assessments: {err}",
            capped.assessment_ids().len()
        );
    }

    Ok(())
}

type Scenario = (&'static str, Vec<AssessmentInput>, i32);

fn outcome_scenarios(settings: &GradingSettings) -> Vec<Scenario> {
    let boundaries = settings.boundaries;
    vec![
        (
            "Weights only reach 90%: the calculation warns instead of predicting",
            vec![
                AssessmentInput::new("60", "100", "50"),
                AssessmentInput::new("", "100", "40"),
            ],
            boundaries.upper_second,
        ),
        (
            "72% already banked with one assessment left",
            vec![
                AssessmentInput::new("90", "100", "80"),
                AssessmentInput::new("", "100", "20"),
            ],
            boundaries.third,
        ),
        (
            "Full marks on the last assessment still falls short of a 1st",
            vec![
                AssessmentInput::new("100", "100", "50"),
                AssessmentInput::new("0", "100", "40"),
                AssessmentInput::new("", "100", "10"),
            ],
            boundaries.first,
        ),
    ]
}

fn outcome_session(
    settings: &GradingSettings,
    rows: Vec<AssessmentInput>,
    target: i32,
) -> Result<SessionView, SessionError> {
    let mut session =
        GradeSession::with_assessments(settings.grading_config(), settings.max_assessments, rows)?;
    session.apply(SessionEvent::SelectTarget { value: target })?;
    session.apply(SessionEvent::CalculateTarget)
}

/// Add zero-weight rows until the session refuses one, returning that rejection.
fn fill_to_cap(session: &mut GradeSession) -> Option<SessionError> {
    for _ in 0..=session.max_assessments() {
        if let Err(err) = session.apply(SessionEvent::add("", "100", "0")) {
            return Some(err);
        }
    }
    None
}

fn step(
    session: &mut GradeSession,
    title: &str,
    events: Vec<SessionEvent>,
) -> Result<(), AppError> {
    println!("\n== {title}");
    let mut view = session.view();
    for event in events {
        view = session.apply(event)?;
    }

    render_view(&view);
    if let Some(prediction) = &view.prediction {
        render_prediction(prediction);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grade_calc::grading::{
        AddBlocked, BoundaryTable, InfeasibleReason, PredictionOutcome, PredictionWarning,
        RoundingMode,
    };

    fn settings() -> GradingSettings {
        GradingSettings {
            boundaries: BoundaryTable::default(),
            rounding: RoundingMode::Normal,
            max_assessments: 6,
        }
    }

    fn outcomes() -> Vec<PredictionOutcome> {
        let settings = settings();
        outcome_scenarios(&settings)
            .into_iter()
            .map(|(_, rows, target)| {
                outcome_session(&settings, rows, target)
                    .expect("scenario runs")
                    .prediction
                    .expect("prediction requested")
                    .outcome
            })
            .collect()
    }

    #[test]
    fn scenarios_cover_warning_already_met_and_infeasible() {
        let outcomes = outcomes();
        assert!(matches!(
            outcomes[0],
            PredictionOutcome::Warning(PredictionWarning::WeightMismatch { .. })
        ));
        assert!(matches!(outcomes[1], PredictionOutcome::AlreadyMet { .. }));
        assert!(outcomes[1].celebrate());
        assert!(matches!(
            outcomes[2],
            PredictionOutcome::Infeasible {
                reason: InfeasibleReason::ExceedsMaximum { .. },
                ..
            }
        ));
    }

    #[test]
    fn zero_weight_rows_run_into_the_count_cap() {
        let settings = settings();
        let mut session =
            GradeSession::with_assessments(settings.grading_config(), 6, Vec::new())
                .expect("empty session");

        let err = fill_to_cap(&mut session).expect("cap reached");
        assert!(matches!(
            err,
            SessionError::AddRejected(AddBlocked::MaxAssessmentsReached { limit: 6 })
        ));
        assert_eq!(session.assessment_ids().len(), 6);
    }
}
