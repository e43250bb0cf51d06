use std::fmt;

use serde::{Deserialize, Serialize};

use super::boundaries::BoundaryTable;
use super::rounding::RoundingMode;

/// Stable identity of an assessment within a session. Display numbering is positional and is
/// recomputed on removal; the id never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub u32);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Raw field values for one row of gradable work, exactly as typed by the user.
///
/// Fields stay unparsed so that a blank score ("not completed yet") can be told apart from an
/// invalid one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentInput {
    #[serde(default)]
    pub score: String,
    #[serde(default = "default_max_score")]
    pub max_score: String,
    #[serde(default)]
    pub weight: String,
}

pub(crate) const DEFAULT_MAX_SCORE: &str = "100";

fn default_max_score() -> String {
    DEFAULT_MAX_SCORE.to_string()
}

impl Default for AssessmentInput {
    fn default() -> Self {
        Self {
            score: String::new(),
            max_score: default_max_score(),
            weight: String::new(),
        }
    }
}

impl AssessmentInput {
    pub fn new(
        score: impl Into<String>,
        max_score: impl Into<String>,
        weight: impl Into<String>,
    ) -> Self {
        Self {
            score: score.into(),
            max_score: max_score.into(),
            weight: weight.into(),
        }
    }

    pub fn score_value(&self) -> FieldValue {
        FieldValue::parse(&self.score)
    }

    pub fn max_score_value(&self) -> FieldValue {
        FieldValue::parse(&self.max_score)
    }

    pub fn weight_value(&self) -> FieldValue {
        FieldValue::parse(&self.weight)
    }

    /// Whether the score field is blank, i.e. the assessment has not been completed.
    pub fn is_pending(&self) -> bool {
        self.score_value() == FieldValue::Empty
    }

    /// Weight used by totals and prediction. A blank weight counts as zero; a weight outside
    /// `[0, 100]` (or one that does not parse) is excluded and also counts as zero.
    pub fn effective_weight(&self) -> f64 {
        match self.weight_value() {
            FieldValue::Number(weight) if (0.0..=100.0).contains(&weight) => weight,
            _ => 0.0,
        }
    }

    /// Max score when it is a whole number of at least one.
    pub fn valid_max_score(&self) -> Option<f64> {
        match self.max_score_value() {
            FieldValue::Number(max) if max >= 1.0 && max.fract() == 0.0 => Some(max),
            _ => None,
        }
    }
}

/// Parsed view of one raw input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Empty,
    Number(f64),
    Malformed,
}

impl FieldValue {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            _ => Self::Malformed,
        }
    }

    pub fn number(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            _ => None,
        }
    }

    /// Integer reading of the field; fractional values are not integers.
    pub fn integer(self) -> Option<i64> {
        match self {
            Self::Number(value) if value.fract() == 0.0 => Some(value as i64),
            _ => None,
        }
    }
}

/// Session-wide configuration passed explicitly into every calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GradingConfig {
    pub boundaries: BoundaryTable,
    pub rounding: RoundingMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parsing_separates_blank_from_malformed() {
        assert_eq!(FieldValue::parse(""), FieldValue::Empty);
        assert_eq!(FieldValue::parse("   "), FieldValue::Empty);
        assert_eq!(FieldValue::parse(" 42 "), FieldValue::Number(42.0));
        assert_eq!(FieldValue::parse("abc"), FieldValue::Malformed);
        assert_eq!(FieldValue::parse("NaN"), FieldValue::Malformed);
        assert_eq!(FieldValue::parse("12.5").integer(), None);
        assert_eq!(FieldValue::parse("12").integer(), Some(12));
    }

    #[test]
    fn blank_weight_counts_as_zero() {
        let input = AssessmentInput::new("50", "100", "");
        assert_eq!(input.effective_weight(), 0.0);

        let out_of_range = AssessmentInput::new("50", "100", "140");
        assert_eq!(out_of_range.effective_weight(), 0.0);
    }

    #[test]
    fn default_input_is_blank_with_max_of_one_hundred() {
        let input = AssessmentInput::default();
        assert!(input.is_pending());
        assert_eq!(input.valid_max_score(), Some(100.0));
    }
}
