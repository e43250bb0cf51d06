use std::env;
use std::fmt;

use crate::grading::boundaries::BoundaryParseError;
use crate::grading::rounding::UnknownRoundingMode;
use crate::grading::{BoundaryTable, GradingConfig, RoundingMode, DEFAULT_MAX_ASSESSMENTS};

/// Upper bound accepted for `GRADE_MAX_ASSESSMENTS`.
pub const ASSESSMENT_LIMIT_CEILING: usize = 64;

/// Parse a per-session assessment cap, accepting `1..=ASSESSMENT_LIMIT_CEILING`.
pub fn parse_assessment_limit(value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|limit| (1..=ASSESSMENT_LIMIT_CEILING).contains(limit))
        .ok_or(ConfigError::InvalidAssessmentLimit)
}

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub grading: GradingSettings,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let rounding = match env::var("GRADE_ROUNDING_MODE") {
            Ok(value) => value
                .parse::<RoundingMode>()
                .map_err(ConfigError::InvalidRoundingMode)?,
            Err(_) => RoundingMode::default(),
        };

        let boundaries = match env::var("GRADE_BOUNDARIES") {
            Ok(value) => value
                .parse::<BoundaryTable>()
                .map_err(ConfigError::InvalidBoundaries)?,
            Err(_) => BoundaryTable::default(),
        };

        let max_assessments = match env::var("GRADE_MAX_ASSESSMENTS") {
            Ok(value) => parse_assessment_limit(&value)?,
            Err(_) => DEFAULT_MAX_ASSESSMENTS,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            grading: GradingSettings {
                boundaries,
                rounding,
                max_assessments,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Initial grading configuration for new sessions.
#[derive(Debug, Clone, Copy)]
pub struct GradingSettings {
    pub boundaries: BoundaryTable,
    pub rounding: RoundingMode,
    pub max_assessments: usize,
}

impl GradingSettings {
    pub fn grading_config(&self) -> GradingConfig {
        GradingConfig {
            boundaries: self.boundaries,
            rounding: self.rounding,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidRoundingMode(UnknownRoundingMode),
    InvalidBoundaries(BoundaryParseError),
    InvalidAssessmentLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRoundingMode(err) => write!(f, "GRADE_ROUNDING_MODE: {err}"),
            ConfigError::InvalidBoundaries(err) => write!(f, "GRADE_BOUNDARIES: {err}"),
            ConfigError::InvalidAssessmentLimit => write!(
                f,
                "GRADE_MAX_ASSESSMENTS must be an integer between 1 and {ASSESSMENT_LIMIT_CEILING}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidRoundingMode(err) => Some(err),
            ConfigError::InvalidBoundaries(err) => Some(err),
            ConfigError::InvalidAssessmentLimit => None,
        }
    }
}
