use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How fractional percentages are turned into the integers shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    Up,
    Down,
    #[default]
    Normal,
}

impl RoundingMode {
    /// Round `value` under this mode. Non-finite input yields `0` so NaN never reaches a display.
    pub fn apply(self, value: f64) -> i64 {
        if !value.is_finite() {
            return 0;
        }

        let rounded = match self {
            Self::Up => value.ceil(),
            Self::Down => value.floor(),
            // Half-up, so -2.5 rounds to -2 rather than away from zero. Compare the
            // fractional part instead of adding 0.5, which can carry just-below-half values up.
            Self::Normal => {
                let floor = value.floor();
                if value - floor >= 0.5 {
                    floor + 1.0
                } else {
                    floor
                }
            }
        };

        rounded as i64
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Normal => "normal",
        }
    }

    /// Format a percentage the way totals and weighted cells display it.
    pub fn percent(self, value: f64) -> String {
        format!("{}%", self.apply(value))
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rounding mode '{0}' (expected up, down or normal)")]
pub struct UnknownRoundingMode(pub String);

impl FromStr for RoundingMode {
    type Err = UnknownRoundingMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" | "ceil" => Ok(Self::Up),
            "down" | "floor" => Ok(Self::Down),
            "" | "normal" | "nearest" => Ok(Self::Normal),
            _ => Err(UnknownRoundingMode(value.to_string())),
        }
    }
}
