use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label reported when a score sits below every threshold (negative or non-numeric scores).
pub const UNGRADED_LABEL: &str = "N/A";

/// Degree classification, ordered from highest to lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeClass {
    First,
    UpperSecond,
    LowerSecond,
    Third,
    MarginalFail,
    Fail,
}

impl GradeClass {
    pub const fn ordered() -> [GradeClass; 6] {
        [
            Self::First,
            Self::UpperSecond,
            Self::LowerSecond,
            Self::Third,
            Self::MarginalFail,
            Self::Fail,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "1st Class",
            Self::UpperSecond => "2.1 Upper Class",
            Self::LowerSecond => "2.2 Lower Class",
            Self::Third => "3rd Class",
            Self::MarginalFail => "Marginal Fail",
            Self::Fail => "Fail",
        }
    }

    pub const fn short_label(self) -> &'static str {
        match self {
            Self::First => "1st",
            Self::UpperSecond => "2.1",
            Self::LowerSecond => "2.2",
            Self::Third => "3rd",
            Self::MarginalFail => "fail",
            Self::Fail => "Fail",
        }
    }

    /// Position in the classification, `0` being the best.
    pub const fn rank(self) -> u8 {
        match self {
            Self::First => 0,
            Self::UpperSecond => 1,
            Self::LowerSecond => 2,
            Self::Third => 3,
            Self::MarginalFail => 4,
            Self::Fail => 5,
        }
    }

    /// Classes a student may pick as a target.
    pub const fn targets() -> [GradeClass; 4] {
        [Self::First, Self::UpperSecond, Self::LowerSecond, Self::Third]
    }
}

/// The five user-editable thresholds. `Fail` is pinned at zero and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryTable {
    pub first: i32,
    pub upper_second: i32,
    pub lower_second: i32,
    pub third: i32,
    pub marginal_fail: i32,
}

impl Default for BoundaryTable {
    fn default() -> Self {
        Self {
            first: 70,
            upper_second: 60,
            lower_second: 50,
            third: 40,
            marginal_fail: 30,
        }
    }
}

/// One entry of the target-grade picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetOption {
    pub class: GradeClass,
    pub label: &'static str,
    pub value: i32,
}

impl BoundaryTable {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn threshold(&self, class: GradeClass) -> i32 {
        match class {
            GradeClass::First => self.first,
            GradeClass::UpperSecond => self.upper_second,
            GradeClass::LowerSecond => self.lower_second,
            GradeClass::Third => self.third,
            GradeClass::MarginalFail => self.marginal_fail,
            GradeClass::Fail => 0,
        }
    }

    /// Mutable access to a configurable threshold; `None` for the fixed `Fail` floor.
    pub fn threshold_mut(&mut self, class: GradeClass) -> Option<&mut i32> {
        match class {
            GradeClass::First => Some(&mut self.first),
            GradeClass::UpperSecond => Some(&mut self.upper_second),
            GradeClass::LowerSecond => Some(&mut self.lower_second),
            GradeClass::Third => Some(&mut self.third),
            GradeClass::MarginalFail => Some(&mut self.marginal_fail),
            GradeClass::Fail => None,
        }
    }

    /// Thresholds in lookup order: descending value, and on equal values the better class first.
    pub fn ordered_thresholds(&self) -> Vec<(i32, GradeClass)> {
        let mut thresholds: Vec<(i32, GradeClass)> = GradeClass::ordered()
            .into_iter()
            .map(|class| (self.threshold(class), class))
            .collect();
        // Stable sort keeps the class order for ties.
        thresholds.sort_by(|a, b| b.0.cmp(&a.0));
        thresholds
    }

    /// Class of the highest threshold not above `score`. Inclusive: a score equal to a threshold
    /// earns that threshold's class.
    pub fn resolve(&self, score: f64) -> Option<GradeClass> {
        if score.is_nan() {
            return None;
        }

        self.ordered_thresholds()
            .into_iter()
            .find(|(threshold, _)| score >= f64::from(*threshold))
            .map(|(_, class)| class)
    }

    pub fn label(&self, score: f64) -> &'static str {
        self.resolve(score)
            .map(GradeClass::label)
            .unwrap_or(UNGRADED_LABEL)
    }

    /// Target picker entries, regenerated from the current thresholds.
    pub fn target_options(&self) -> Vec<TargetOption> {
        GradeClass::targets()
            .into_iter()
            .map(|class| TargetOption {
                class,
                label: class.short_label(),
                value: self.threshold(class),
            })
            .collect()
    }

    /// Keep `current` when some option still carries that value, otherwise fall back to the first
    /// option.
    pub fn reconcile_target(&self, current: i32) -> i32 {
        let options = self.target_options();
        if options.iter().any(|option| option.value == current) {
            current
        } else {
            options
                .first()
                .map(|option| option.value)
                .unwrap_or(self.first)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundaryParseError {
    #[error("expected 5 comma-separated thresholds, found {0}")]
    WrongCount(usize),
    #[error("threshold '{0}' is not an integer")]
    NotAnInteger(String),
}

impl FromStr for BoundaryTable {
    type Err = BoundaryParseError;

    /// Parses `first,upper_second,lower_second,third,marginal_fail`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != 5 {
            return Err(BoundaryParseError::WrongCount(parts.len()));
        }

        let mut values = [0i32; 5];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<i32>()
                .map_err(|_| BoundaryParseError::NotAnInteger(part.to_string()))?;
        }

        Ok(Self {
            first: values[0],
            upper_second: values[1],
            lower_second: values[2],
            third: values[3],
            marginal_fail: values[4],
        })
    }
}
