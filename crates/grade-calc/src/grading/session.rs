use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::aggregate::{aggregate, AddBlocked};
use super::boundaries::GradeClass;
use super::domain::{AssessmentId, AssessmentInput, GradingConfig, DEFAULT_MAX_SCORE};
use super::rounding::RoundingMode;
use super::views::{session_view, SessionView};

pub const DEFAULT_MAX_ASSESSMENTS: usize = 6;

/// An assessment row as held by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assessment {
    pub id: AssessmentId,
    pub input: AssessmentInput,
}

/// Discrete user input folded into the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    AddAssessment {
        #[serde(default)]
        score: String,
        #[serde(default = "default_max_score")]
        max_score: String,
        #[serde(default)]
        weight: String,
    },
    RemoveAssessment {
        id: AssessmentId,
    },
    EditScore {
        id: AssessmentId,
        value: String,
    },
    EditMaxScore {
        id: AssessmentId,
        value: String,
    },
    EditWeight {
        id: AssessmentId,
        value: String,
    },
    SetBoundary {
        class: GradeClass,
        value: i32,
    },
    ResetBoundaries,
    SetRounding {
        mode: RoundingMode,
    },
    SelectTarget {
        value: i32,
    },
    CalculateTarget,
    Clear,
}

fn default_max_score() -> String {
    DEFAULT_MAX_SCORE.to_string()
}

impl SessionEvent {
    /// Blank row, as produced by the "add assessment" control.
    pub fn add_blank() -> Self {
        Self::AddAssessment {
            score: String::new(),
            max_score: default_max_score(),
            weight: String::new(),
        }
    }

    pub fn add(
        score: impl Into<String>,
        max_score: impl Into<String>,
        weight: impl Into<String>,
    ) -> Self {
        Self::AddAssessment {
            score: score.into(),
            max_score: max_score.into(),
            weight: weight.into(),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddAssessment { .. } => "add_assessment",
            Self::RemoveAssessment { .. } => "remove_assessment",
            Self::EditScore { .. } => "edit_score",
            Self::EditMaxScore { .. } => "edit_max_score",
            Self::EditWeight { .. } => "edit_weight",
            Self::SetBoundary { .. } => "set_boundary",
            Self::ResetBoundaries => "reset_boundaries",
            Self::SetRounding { .. } => "set_rounding",
            Self::SelectTarget { .. } => "select_target",
            Self::CalculateTarget => "calculate_target",
            Self::Clear => "clear",
        }
    }
}

/// Reasons an event is refused. A refused event leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot add assessment: {}", .0.reason())]
    AddRejected(AddBlocked),
    #[error("assessment {0} does not exist")]
    UnknownAssessment(AssessmentId),
    #[error("{0}% is not one of the selectable target grades")]
    UnknownTarget(i32),
    #[error("the Fail boundary is fixed at 0")]
    FixedBoundary,
}

/// Single-user calculation context: the record set, the grading configuration and the target
/// selection.
#[derive(Debug, Clone)]
pub struct GradeSession {
    assessments: Vec<Assessment>,
    config: GradingConfig,
    max_assessments: usize,
    selected_target: i32,
    prediction_requested: bool,
    next_id: u32,
}

impl Default for GradeSession {
    fn default() -> Self {
        Self::new(GradingConfig::default(), DEFAULT_MAX_ASSESSMENTS)
    }
}

impl GradeSession {
    /// New session holding one blank assessment.
    pub fn new(config: GradingConfig, max_assessments: usize) -> Self {
        let mut session = Self::empty(config, max_assessments);
        session.push(AssessmentInput::default());
        session
    }

    /// Session seeded with existing rows, e.g. from an import.
    pub fn with_assessments(
        config: GradingConfig,
        max_assessments: usize,
        inputs: Vec<AssessmentInput>,
    ) -> Result<Self, SessionError> {
        if inputs.len() > max_assessments {
            return Err(SessionError::AddRejected(
                AddBlocked::MaxAssessmentsReached {
                    limit: max_assessments,
                },
            ));
        }

        let mut session = Self::empty(config, max_assessments);
        for input in inputs {
            session.push(input);
        }
        Ok(session)
    }

    fn empty(config: GradingConfig, max_assessments: usize) -> Self {
        Self {
            assessments: Vec::new(),
            selected_target: config.boundaries.reconcile_target(config.boundaries.first),
            config,
            max_assessments,
            prediction_requested: false,
            next_id: 1,
        }
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    pub fn selected_target(&self) -> i32 {
        self.selected_target
    }

    pub fn max_assessments(&self) -> usize {
        self.max_assessments
    }

    pub fn assessment_ids(&self) -> Vec<AssessmentId> {
        self.assessments
            .iter()
            .map(|assessment| assessment.id)
            .collect()
    }

    pub fn inputs(&self) -> Vec<AssessmentInput> {
        self.assessments
            .iter()
            .map(|assessment| assessment.input.clone())
            .collect()
    }

    pub fn view(&self) -> SessionView {
        session_view(
            &self.assessments,
            &self.config,
            self.max_assessments,
            self.selected_target,
            self.prediction_requested,
        )
    }

    /// Fold one event into the session and return the recomputed view.
    pub fn apply(&mut self, event: SessionEvent) -> Result<SessionView, SessionError> {
        let kind = event.kind();
        match self.reduce(event) {
            Ok(()) => {
                debug!(
                    event = kind,
                    assessments = self.assessments.len(),
                    "session event applied"
                );
                Ok(self.view())
            }
            Err(err) => {
                warn!(event = kind, error = %err, "session event rejected");
                Err(err)
            }
        }
    }

    fn reduce(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::AddAssessment {
                score,
                max_score,
                weight,
            } => {
                let totals = aggregate(&self.inputs());
                if let Some(blocked) = totals.add_blocked(self.assessments.len(), self.max_assessments)
                {
                    return Err(SessionError::AddRejected(blocked));
                }
                self.push(AssessmentInput::new(score, max_score, weight));
            }
            SessionEvent::RemoveAssessment { id } => {
                let position = self.position(id)?;
                self.assessments.remove(position);
            }
            SessionEvent::EditScore { id, value } => {
                self.input_mut(id)?.score = value;
            }
            SessionEvent::EditMaxScore { id, value } => {
                self.input_mut(id)?.max_score = value;
            }
            SessionEvent::EditWeight { id, value } => {
                self.input_mut(id)?.weight = value;
            }
            SessionEvent::SetBoundary { class, value } => {
                let threshold = self
                    .config
                    .boundaries
                    .threshold_mut(class)
                    .ok_or(SessionError::FixedBoundary)?;
                *threshold = value;
                self.selected_target = self.config.boundaries.reconcile_target(self.selected_target);
            }
            SessionEvent::ResetBoundaries => {
                self.config.boundaries.reset();
                self.selected_target = self.config.boundaries.reconcile_target(self.selected_target);
            }
            SessionEvent::SetRounding { mode } => {
                // Rounding only changes how values are displayed, so an open prediction stays.
                self.config.rounding = mode;
                return Ok(());
            }
            SessionEvent::SelectTarget { value } => {
                let known = self
                    .config
                    .boundaries
                    .target_options()
                    .iter()
                    .any(|option| option.value == value);
                if !known {
                    return Err(SessionError::UnknownTarget(value));
                }
                self.selected_target = value;
            }
            SessionEvent::CalculateTarget => {
                self.prediction_requested = true;
                return Ok(());
            }
            SessionEvent::Clear => {
                self.assessments.clear();
                self.push(AssessmentInput::default());
            }
        }

        self.prediction_requested = false;
        Ok(())
    }

    fn push(&mut self, input: AssessmentInput) {
        let id = AssessmentId(self.next_id);
        self.next_id += 1;
        self.assessments.push(Assessment { id, input });
    }

    fn position(&self, id: AssessmentId) -> Result<usize, SessionError> {
        self.assessments
            .iter()
            .position(|assessment| assessment.id == id)
            .ok_or(SessionError::UnknownAssessment(id))
    }

    fn input_mut(&mut self, id: AssessmentId) -> Result<&mut AssessmentInput, SessionError> {
        let position = self.position(id)?;
        Ok(&mut self.assessments[position].input)
    }
}

/// Pure form of [`GradeSession::apply`]: the input session is left as it was.
pub fn reduce(
    session: &GradeSession,
    event: SessionEvent,
) -> Result<(GradeSession, SessionView), SessionError> {
    let mut next = session.clone();
    let view = next.apply(event)?;
    Ok((next, view))
}
