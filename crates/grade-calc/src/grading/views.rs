use serde::Serialize;

use super::aggregate::{aggregate, weighted_score, AddBlocked, AggregateResult};
use super::boundaries::{BoundaryTable, TargetOption};
use super::domain::{AssessmentId, GradingConfig};
use super::prediction::{predict, PredictionOutcome};
use super::rounding::RoundingMode;
use super::session::Assessment;
use super::validation::{validate, FieldValidity};

/// Placeholder shown in a weighted cell without a usable score.
pub const NO_VALUE: &str = "-";

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub id: AssessmentId,
    pub index: usize,
    pub label: String,
    pub score: String,
    pub max_score: String,
    pub weight: String,
    pub validity: FieldValidity,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<&'static str>,
    pub weighted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsView {
    pub total_weight: f64,
    pub total_weighted_score: f64,
    pub weight_display: String,
    pub weighted_score_display: String,
    pub grade: &'static str,
    /// `false` when the weights do not add up to 100% and the totals should be highlighted.
    pub weight_balanced: bool,
    pub has_errors: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlsView {
    pub can_add: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_blocked: Option<AddBlocked>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_blocked_reason: Option<String>,
    pub can_calculate: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub outcome: PredictionOutcome,
    pub messages: Vec<String>,
    pub warning: bool,
}

/// Everything the presentation layer renders after an event.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub assessments: Vec<AssessmentView>,
    pub totals: TotalsView,
    pub controls: ControlsView,
    pub rounding: RoundingMode,
    pub boundaries: BoundaryTable,
    pub target_options: Vec<TargetOption>,
    pub selected_target: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<PredictionView>,
    pub celebrate: bool,
}

pub(crate) fn assessment_view(
    position: usize,
    assessment: &Assessment,
    rounding: RoundingMode,
) -> AssessmentView {
    let input = &assessment.input;
    let validity = validate(input);
    // The cell stays blank while any field is flagged, even if totals still count the row.
    let weighted = weighted_score(input)
        .filter(|_| !validity.has_errors())
        .map(|value| rounding.percent(value))
        .unwrap_or_else(|| NO_VALUE.to_string());

    AssessmentView {
        id: assessment.id,
        index: position + 1,
        label: format!("Assessment {}", position + 1),
        score: input.score.clone(),
        max_score: input.max_score.clone(),
        weight: input.weight.clone(),
        validity,
        errors: validity.messages(),
        weighted,
    }
}

pub(crate) fn totals_view(totals: &AggregateResult, config: &GradingConfig) -> TotalsView {
    TotalsView {
        total_weight: totals.total_weight,
        total_weighted_score: totals.total_weighted_score,
        weight_display: config.rounding.percent(totals.total_weight),
        weighted_score_display: config.rounding.percent(totals.total_weighted_score),
        grade: config.boundaries.label(totals.total_weighted_score),
        weight_balanced: totals.weight_balanced(),
        has_errors: totals.has_errors,
    }
}

pub(crate) fn session_view(
    assessments: &[Assessment],
    config: &GradingConfig,
    max_assessments: usize,
    selected_target: i32,
    prediction_requested: bool,
) -> SessionView {
    let inputs: Vec<_> = assessments
        .iter()
        .map(|assessment| assessment.input.clone())
        .collect();
    let totals = aggregate(&inputs);
    let add_blocked = totals.add_blocked(assessments.len(), max_assessments);

    let prediction = prediction_requested.then(|| {
        let outcome = predict(&inputs, f64::from(selected_target), config);
        PredictionView {
            messages: outcome.messages(config.rounding),
            warning: outcome.is_warning(),
            outcome,
        }
    });
    let celebrate = prediction
        .as_ref()
        .map(|view| view.outcome.celebrate())
        .unwrap_or(false);

    SessionView {
        assessments: assessments
            .iter()
            .enumerate()
            .map(|(position, assessment)| assessment_view(position, assessment, config.rounding))
            .collect(),
        totals: totals_view(&totals, config),
        controls: ControlsView {
            can_add: add_blocked.is_none(),
            add_blocked_reason: add_blocked.as_ref().map(AddBlocked::reason),
            add_blocked,
            can_calculate: totals.can_predict(),
        },
        rounding: config.rounding,
        boundaries: config.boundaries,
        target_options: config.boundaries.target_options(),
        selected_target,
        prediction,
        celebrate,
    }
}
