use super::outcome::{ConcentrateShortfall, RequiredScore, ScenarioOption};
use crate::grading::rounding::RoundingMode;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingAssessment {
    pub index: usize,
    pub weight: f64,
    pub max_score: f64,
}

impl PendingAssessment {
    fn required_at(&self, percent: f64, rounding: RoundingMode) -> RequiredScore {
        RequiredScore {
            assessment: self.index,
            score: rounding.apply(percent * self.max_score / 100.0),
            max_score: rounding.apply(self.max_score),
        }
    }
}

pub(crate) fn enumerate_scenarios(
    pending: &[PendingAssessment],
    points_needed: f64,
    rounding: RoundingMode,
) -> Vec<ScenarioOption> {
    if let [only] = pending {
        let percent_needed = points_needed / only.weight * 100.0;
        return vec![ScenarioOption::Single {
            required: only.required_at(percent_needed, rounding),
            achievable: percent_needed <= 100.0,
        }];
    }

    let mut options: Vec<ScenarioOption> = pending
        .iter()
        .enumerate()
        .map(|(position, focus)| concentrate_on(pending, position, focus, points_needed, rounding))
        .collect();

    let total_weight: f64 = pending.iter().map(|assessment| assessment.weight).sum();
    let average_percent = points_needed / total_weight * 100.0;
    options.push(ScenarioOption::EqualDistribution {
        average_percent,
        achievable: average_percent <= 100.0,
        required: pending
            .iter()
            .map(|assessment| assessment.required_at(average_percent, rounding))
            .collect(),
    });

    options
}

/// Full marks on `focus`, with whatever is still missing spread over the other pending
/// assessments in proportion to their weight.
fn concentrate_on(
    pending: &[PendingAssessment],
    position: usize,
    focus: &PendingAssessment,
    points_needed: f64,
    rounding: RoundingMode,
) -> ScenarioOption {
    let max_score = rounding.apply(focus.max_score);
    let remaining_points = points_needed - focus.weight;

    if remaining_points <= 0.0 {
        return ScenarioOption::FullMarksSuffice {
            assessment: focus.index,
            max_score,
        };
    }

    let others: Vec<&PendingAssessment> = pending
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != position)
        .map(|(_, assessment)| assessment)
        .collect();
    let other_weight: f64 = others.iter().map(|assessment| assessment.weight).sum();

    if other_weight == 0.0 {
        return ScenarioOption::Unreachable {
            assessment: focus.index,
            max_score,
            shortfall: ConcentrateShortfall::NoOtherWeight,
        };
    }

    let average_needed = remaining_points / other_weight * 100.0;
    if average_needed > 100.0 {
        return ScenarioOption::Unreachable {
            assessment: focus.index,
            max_score,
            shortfall: ConcentrateShortfall::ExceedsFullMarks,
        };
    }

    ScenarioOption::FullMarksPlus {
        assessment: focus.index,
        max_score,
        others: others
            .into_iter()
            .map(|assessment| assessment.required_at(average_needed, rounding))
            .collect(),
    }
}
