use serde::Serialize;

use super::domain::{AssessmentInput, FieldValue};

pub const SCORE_ERROR: &str = "Score must be between 0 and max score";
pub const MAX_SCORE_ERROR: &str = "Max score must be positive";
pub const WEIGHT_ERROR: &str = "Weight must be between 0 and 100";

/// Per-field validity of one assessment. `false` means the presentation layer shows the inline
/// error for that field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldValidity {
    pub score: bool,
    pub max_score: bool,
    pub weight: bool,
}

impl FieldValidity {
    pub fn has_errors(&self) -> bool {
        !(self.score && self.max_score && self.weight)
    }

    /// Inline error messages for the fields that failed.
    pub fn messages(&self) -> Vec<&'static str> {
        let mut messages = Vec::new();
        if !self.score {
            messages.push(SCORE_ERROR);
        }
        if !self.max_score {
            messages.push(MAX_SCORE_ERROR);
        }
        if !self.weight {
            messages.push(WEIGHT_ERROR);
        }
        messages
    }
}

pub fn validate(input: &AssessmentInput) -> FieldValidity {
    let max_score = input.valid_max_score().is_some();

    let weight = match input.weight_value() {
        FieldValue::Empty => true,
        value => value
            .integer()
            .map(|weight| (0..=100).contains(&weight))
            .unwrap_or(false),
    };

    // An unparseable max is already flagged on its own field, so the score is only held to the
    // upper bound when there is a number to compare against.
    let score = match input.score_value() {
        FieldValue::Empty => true,
        value => match value.integer() {
            Some(score) if score >= 0 => match input.max_score_value().number() {
                Some(max) => score as f64 <= max,
                None => true,
            },
            _ => false,
        },
    };

    FieldValidity {
        score,
        max_score,
        weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(score: &str, max: &str, weight: &str) -> FieldValidity {
        validate(&AssessmentInput::new(score, max, weight))
    }

    #[test]
    fn blank_score_and_weight_are_valid() {
        let validity = check("", "100", "");
        assert!(!validity.has_errors());
    }

    #[test]
    fn max_score_must_be_a_positive_integer() {
        assert!(!check("", "0", "10").max_score);
        assert!(!check("", "", "10").max_score);
        assert!(!check("", "12.5", "10").max_score);
        assert!(!check("", "-3", "10").max_score);
        assert!(check("", "1", "10").max_score);
    }

    #[test]
    fn weight_outside_range_or_fractional_is_invalid() {
        assert!(!check("", "100", "101").weight);
        assert!(!check("", "100", "-1").weight);
        assert!(!check("", "100", "20.5").weight);
        assert!(!check("", "100", "ten").weight);
        assert!(check("", "100", "0").weight);
        assert!(check("", "100", "100").weight);
    }

    #[test]
    fn score_is_bounded_by_max_score() {
        assert!(check("40", "40", "10").score);
        assert!(!check("41", "40", "10").score);
        assert!(!check("-1", "40", "10").score);
        assert!(!check("12.5", "40", "10").score);
    }

    #[test]
    fn messages_follow_failed_fields() {
        let validity = check("120", "100", "150");
        assert!(validity.has_errors());
        assert_eq!(validity.messages(), vec![SCORE_ERROR, WEIGHT_ERROR]);
    }
}
