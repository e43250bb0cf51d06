use crate::grading::domain::{AssessmentInput, GradingConfig};
use crate::grading::prediction::{predict, PredictionOutcome};
use crate::grading::session::{GradeSession, SessionEvent, DEFAULT_MAX_ASSESSMENTS};
use crate::grading::views::SessionView;

pub(super) fn record(score: &str, max_score: &str, weight: &str) -> AssessmentInput {
    AssessmentInput::new(score, max_score, weight)
}

pub(super) fn pending(weight: &str) -> AssessmentInput {
    AssessmentInput::new("", "100", weight)
}

pub(super) fn default_config() -> GradingConfig {
    GradingConfig::default()
}

pub(super) fn predict_default(records: &[AssessmentInput], target: f64) -> PredictionOutcome {
    predict(records, target, &default_config())
}

/// Empty session whose first (blank) row has been removed, so tests start from zero rows.
pub(super) fn bare_session() -> GradeSession {
    GradeSession::with_assessments(default_config(), DEFAULT_MAX_ASSESSMENTS, Vec::new())
        .expect("empty session fits")
}

pub(super) fn apply_all(session: &mut GradeSession, events: Vec<SessionEvent>) -> SessionView {
    let mut last = session.view();
    for event in events {
        last = session.apply(event).expect("event applies");
    }
    last
}
