use serde::Serialize;

use crate::grading::rounding::RoundingMode;

/// Score needed on one assessment, already rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequiredScore {
    pub assessment: usize,
    pub score: i64,
    pub max_score: i64,
}

impl RequiredScore {
    pub fn fraction(&self) -> String {
        format!("{}/{}", self.score, self.max_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcentrateShortfall {
    /// No other pending assessment carries weight.
    NoOtherWeight,
    /// The others would need more than full marks.
    ExceedsFullMarks,
}

/// One way of reaching the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioOption {
    /// The only pending assessment; `achievable` is false when the score exceeds the maximum.
    Single {
        required: RequiredScore,
        achievable: bool,
    },
    FullMarksSuffice {
        assessment: usize,
        max_score: i64,
    },
    FullMarksPlus {
        assessment: usize,
        max_score: i64,
        others: Vec<RequiredScore>,
    },
    Unreachable {
        assessment: usize,
        max_score: i64,
        shortfall: ConcentrateShortfall,
    },
    EqualDistribution {
        average_percent: f64,
        achievable: bool,
        required: Vec<RequiredScore>,
    },
}

impl ScenarioOption {
    pub fn is_achievable(&self) -> bool {
        match self {
            ScenarioOption::Single { achievable, .. }
            | ScenarioOption::EqualDistribution { achievable, .. } => *achievable,
            ScenarioOption::FullMarksSuffice { .. } | ScenarioOption::FullMarksPlus { .. } => true,
            ScenarioOption::Unreachable { .. } => false,
        }
    }

    /// Human readable description. `number` is the option's position among the
    /// concentrate-on-one options and is ignored by the others.
    pub fn describe(&self, number: usize) -> String {
        match self {
            ScenarioOption::Single {
                required,
                achievable: true,
            } => format!(
                "Assessment {}: You need to score {} out of {}",
                required.assessment, required.score, required.max_score
            ),
            ScenarioOption::Single {
                required,
                achievable: false,
            } => format!(
                "Assessment {}: Target cannot be achieved (would need {})",
                required.assessment,
                required.fraction()
            ),
            ScenarioOption::FullMarksSuffice {
                assessment,
                max_score,
            } => format!(
                "Option {number}: Score 100% ({max_score}/{max_score}) on Assessment {assessment}"
            ),
            ScenarioOption::FullMarksPlus {
                assessment,
                max_score,
                others,
            } => {
                let mut text = format!(
                    "Option {number}: Score 100% ({max_score}/{max_score}) on Assessment {assessment}"
                );
                for other in others {
                    text.push_str(&format!(
                        " AND {} on Assessment {}",
                        other.fraction(),
                        other.assessment
                    ));
                }
                text
            }
            ScenarioOption::Unreachable {
                assessment,
                shortfall: ConcentrateShortfall::NoOtherWeight,
                ..
            } => format!(
                "Option {number}: Cannot achieve target even with 100% on Assessment {assessment}"
            ),
            ScenarioOption::Unreachable {
                assessment,
                shortfall: ConcentrateShortfall::ExceedsFullMarks,
                ..
            } => format!(
                "Option {number}: Score 100% on Assessment {assessment}, but still cannot achieve target"
            ),
            ScenarioOption::EqualDistribution {
                achievable,
                required,
                ..
            } => {
                let parts: Vec<String> = required
                    .iter()
                    .map(|entry| {
                        if *achievable {
                            format!("Assessment {}: {}", entry.assessment, entry.fraction())
                        } else {
                            format!(
                                "Assessment {}: Would need {} (impossible)",
                                entry.assessment,
                                entry.fraction()
                            )
                        }
                    })
                    .collect();
                format!(
                    "Option (Equal Distribution): Score equally across all assessments: {}",
                    parts.join("; ")
                )
            }
        }
    }
}

/// Scenario list for a reachable target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioPlan {
    pub target_percent: f64,
    pub target_grade: &'static str,
    pub points_needed: f64,
    pub options: Vec<ScenarioOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionWarning {
    WeightMismatch { total_weight: f64 },
    InvalidAssessments { assessments: Vec<usize> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InfeasibleReason {
    /// Even full marks on everything pending stays below the target.
    ExceedsMaximum {
        max_possible: f64,
        max_possible_grade: &'static str,
    },
    NoRemainingAssessments {
        current_score: f64,
        current_grade: &'static str,
    },
}

/// Result of a target prediction. Every input, degenerate or not, maps to one of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Warning(PredictionWarning),
    Infeasible {
        target_percent: f64,
        target_grade: &'static str,
        reason: InfeasibleReason,
    },
    AlreadyMet {
        target_percent: f64,
        target_grade: &'static str,
        current_score: f64,
        remaining: usize,
    },
    Scenarios(ScenarioPlan),
}

impl PredictionOutcome {
    /// Whether the presentation layer should play its celebration.
    pub fn celebrate(&self) -> bool {
        matches!(self, PredictionOutcome::AlreadyMet { .. })
    }

    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            PredictionOutcome::Warning(_) | PredictionOutcome::Infeasible { .. }
        )
    }

    pub fn options(&self) -> &[ScenarioOption] {
        match self {
            PredictionOutcome::Scenarios(plan) => &plan.options,
            _ => &[],
        }
    }

    /// Message lines for display, with every percentage passed through `rounding`.
    pub fn messages(&self, rounding: RoundingMode) -> Vec<String> {
        match self {
            PredictionOutcome::Warning(PredictionWarning::WeightMismatch { total_weight }) => {
                vec![format!(
                    "Total weight is {} (should be 100%). Adjust weights before calculating target.",
                    rounding.percent(*total_weight)
                )]
            }
            PredictionOutcome::Warning(PredictionWarning::InvalidAssessments { assessments }) => {
                let list: Vec<String> = assessments.iter().map(usize::to_string).collect();
                vec![format!(
                    "Fix the invalid fields on Assessment {} before calculating target.",
                    list.join(", ")
                )]
            }
            PredictionOutcome::Infeasible {
                target_percent,
                target_grade,
                reason,
            } => {
                let mut lines = vec![format!(
                    "Target of {target_grade} ({target_percent}%) cannot be achieved."
                )];
                match reason {
                    InfeasibleReason::ExceedsMaximum {
                        max_possible,
                        max_possible_grade,
                    } => lines.push(format!(
                        "Maximum possible: {} ({max_possible_grade})",
                        rounding.percent(*max_possible)
                    )),
                    InfeasibleReason::NoRemainingAssessments {
                        current_score,
                        current_grade,
                    } => {
                        lines.push(format!(
                            "Current score: {} ({current_grade})",
                            rounding.percent(*current_score)
                        ));
                        lines.push("No remaining assessments to improve.".to_string());
                    }
                }
                lines
            }
            PredictionOutcome::AlreadyMet {
                target_grade,
                current_score,
                remaining,
                ..
            } => {
                let verb = if *remaining == 0 {
                    "met"
                } else {
                    "achieved"
                };
                vec![format!(
                    "Target of {target_grade} already {verb} with {}!",
                    rounding.percent(*current_score)
                )]
            }
            PredictionOutcome::Scenarios(plan) => {
                let mut lines = vec![format!(
                    "To achieve {} ({}%), you need {} more percentage points.",
                    plan.target_grade,
                    plan.target_percent,
                    rounding.apply(plan.points_needed)
                )];
                if plan.options.len() > 1 {
                    lines.push("Choose ONE of these options:".to_string());
                }
                lines.extend(
                    plan.options
                        .iter()
                        .enumerate()
                        .map(|(position, option)| option.describe(position + 1)),
                );
                lines
            }
        }
    }
}
