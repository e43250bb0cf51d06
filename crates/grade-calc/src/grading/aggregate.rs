use serde::Serialize;

use super::domain::AssessmentInput;
use super::validation::validate;

/// Tolerance used when checking that weights add up to a whole.
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// Totals derived from the full record set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateResult {
    pub total_weight: f64,
    pub total_weighted_score: f64,
    pub has_errors: bool,
}

/// Why a new assessment cannot be added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddBlocked {
    MaxAssessmentsReached { limit: usize },
    WeightComplete,
}

impl AddBlocked {
    pub fn reason(&self) -> String {
        match self {
            AddBlocked::MaxAssessmentsReached { limit } => {
                format!("max assessments reached ({limit})")
            }
            AddBlocked::WeightComplete => "100% weight reached".to_string(),
        }
    }
}

/// Weighted contribution of a single assessment, when it has a usable score.
pub fn weighted_score(input: &AssessmentInput) -> Option<f64> {
    let validity = validate(input);
    if !validity.score || !validity.max_score || !weight_in_range(input) {
        return None;
    }

    let score = input.score_value().number()?;
    let max = input.valid_max_score()?;
    Some(score / max * 100.0 * input.effective_weight() / 100.0)
}

fn weight_in_range(input: &AssessmentInput) -> bool {
    match input.weight_value().number() {
        Some(weight) => (0.0..=100.0).contains(&weight),
        None => input.weight.trim().is_empty(),
    }
}

pub fn aggregate(records: &[AssessmentInput]) -> AggregateResult {
    let mut total_weight = 0.0;
    let mut total_weighted_score = 0.0;
    let mut has_errors = false;

    for record in records {
        has_errors |= validate(record).has_errors();
        total_weight += record.effective_weight();
        if let Some(weighted) = weighted_score(record) {
            total_weighted_score += weighted;
        }
    }

    AggregateResult {
        total_weight,
        total_weighted_score,
        has_errors,
    }
}

impl AggregateResult {
    pub fn weight_balanced(&self) -> bool {
        (self.total_weight - 100.0).abs() <= WEIGHT_TOLERANCE
    }

    /// Target prediction needs a clean record set whose weights sum to 100%.
    pub fn can_predict(&self) -> bool {
        self.weight_balanced() && !self.has_errors
    }

    pub fn add_blocked(&self, record_count: usize, limit: usize) -> Option<AddBlocked> {
        if record_count >= limit {
            Some(AddBlocked::MaxAssessmentsReached { limit })
        } else if self.total_weight >= 100.0 {
            Some(AddBlocked::WeightComplete)
        } else {
            None
        }
    }
}
