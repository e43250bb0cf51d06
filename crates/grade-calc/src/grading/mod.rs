//! Weighted grade calculation, grade boundaries and target prediction.
//!
//! Everything in this module is synchronous and pure apart from [`GradeSession`], which owns the
//! mutable record set and folds presentation events into fresh [`SessionView`]s.

pub mod aggregate;
pub mod boundaries;
pub mod domain;
pub mod import;
pub mod prediction;
pub mod rounding;
pub mod session;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, AddBlocked, AggregateResult};
pub use boundaries::{BoundaryTable, GradeClass, TargetOption};
pub use domain::{AssessmentId, AssessmentInput, FieldValue, GradingConfig};
pub use import::{read_assessments, AssessmentImportError};
pub use prediction::{
    predict, ConcentrateShortfall, InfeasibleReason, PredictionOutcome, PredictionWarning,
    RequiredScore, ScenarioOption, ScenarioPlan,
};
pub use rounding::RoundingMode;
pub use session::{reduce, GradeSession, SessionError, SessionEvent, DEFAULT_MAX_ASSESSMENTS};
pub use validation::{validate, FieldValidity};
pub use views::{AssessmentView, ControlsView, PredictionView, SessionView, TotalsView};
