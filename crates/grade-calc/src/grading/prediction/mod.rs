//! Inverse calculation: what the remaining assessments need to score to reach a target.

mod outcome;
mod scenarios;

pub use outcome::{
    ConcentrateShortfall, InfeasibleReason, PredictionOutcome, PredictionWarning, RequiredScore,
    ScenarioOption, ScenarioPlan,
};

use super::aggregate::{weighted_score, WEIGHT_TOLERANCE};
use super::domain::{AssessmentInput, GradingConfig};
use super::validation::validate;
use scenarios::{enumerate_scenarios, PendingAssessment};

/// Assessments with a score on record.
struct CompletedTotals {
    weighted_score: f64,
    weight: f64,
}

/// Work out whether `target_percent` is still reachable and, if so, which combinations of
/// scores on the pending assessments get there.
pub fn predict(
    records: &[AssessmentInput],
    target_percent: f64,
    config: &GradingConfig,
) -> PredictionOutcome {
    let boundaries = &config.boundaries;

    let invalid: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| validate(record).has_errors())
        .map(|(position, _)| position + 1)
        .collect();
    if !invalid.is_empty() {
        return PredictionOutcome::Warning(PredictionWarning::InvalidAssessments {
            assessments: invalid,
        });
    }

    let (completed, pending) = partition(records);
    let remaining_weight: f64 = pending.iter().map(|assessment| assessment.weight).sum();
    let total_weight = completed.weight + remaining_weight;

    if (total_weight - 100.0).abs() > WEIGHT_TOLERANCE {
        return PredictionOutcome::Warning(PredictionWarning::WeightMismatch { total_weight });
    }

    let current = completed.weighted_score;
    let target_grade = boundaries.label(target_percent);
    let max_possible = current + remaining_weight;

    if target_percent > max_possible {
        return PredictionOutcome::Infeasible {
            target_percent,
            target_grade,
            reason: InfeasibleReason::ExceedsMaximum {
                max_possible,
                max_possible_grade: boundaries.label(max_possible),
            },
        };
    }

    if pending.is_empty() && current < target_percent {
        return PredictionOutcome::Infeasible {
            target_percent,
            target_grade,
            reason: InfeasibleReason::NoRemainingAssessments {
                current_score: current,
                current_grade: boundaries.label(current),
            },
        };
    }

    if current >= target_percent {
        return PredictionOutcome::AlreadyMet {
            target_percent,
            target_grade,
            current_score: current,
            remaining: pending.len(),
        };
    }

    let points_needed = target_percent - current;
    PredictionOutcome::Scenarios(ScenarioPlan {
        target_percent,
        target_grade,
        points_needed,
        options: enumerate_scenarios(&pending, points_needed, config.rounding),
    })
}

/// Split records into scored ones and pending ones that still carry weight. Pending records with
/// zero weight cannot move the result and are dropped.
fn partition(records: &[AssessmentInput]) -> (CompletedTotals, Vec<PendingAssessment>) {
    let mut completed = CompletedTotals {
        weighted_score: 0.0,
        weight: 0.0,
    };
    let mut pending = Vec::new();

    for (position, record) in records.iter().enumerate() {
        let weight = record.effective_weight();
        if record.is_pending() {
            if weight > 0.0 {
                if let Some(max_score) = record.valid_max_score() {
                    pending.push(PendingAssessment {
                        index: position + 1,
                        weight,
                        max_score,
                    });
                }
            }
        } else if let Some(weighted) = weighted_score(record) {
            completed.weighted_score += weighted;
            completed.weight += weight;
        }
    }

    (completed, pending)
}
