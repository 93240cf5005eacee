//! Error types for sprint domain validation and parsing.

use super::{SprintId, SprintState, TaskId};
use chrono::NaiveDate;
use thiserror::Error;

/// Broad classification of domain rejections.
///
/// Usage errors mean the operator attempted an action that is not allowed in
/// the current situation. Validation errors mean the requested write would
/// violate a data invariant. Neither is transient; callers should correct the
/// input and resubmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SprintErrorCategory {
    /// The operator attempted an invalid action.
    Usage,
    /// The data would violate an invariant.
    Validation,
}

/// Errors returned by sprint domain rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SprintDomainError {
    /// The sprint name is empty after trimming.
    #[error("sprint name must not be empty")]
    EmptySprintName,

    /// The end date precedes the start date.
    #[error("end date {end} cannot be earlier than start date {start}")]
    EndBeforeStart {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// The inclusive date range is longer than the policy allows.
    #[error("sprint duration of {days} days exceeds the {max_days}-day limit")]
    DurationExceeded {
        /// Requested inclusive duration.
        days: i64,
        /// Maximum permitted duration.
        max_days: u32,
    },

    /// Two open sprints of the same project share at least one day.
    #[error("sprint \"{sprint}\" overlaps with existing sprint \"{other}\" in this project")]
    SprintOverlap {
        /// Name of the sprint being written.
        sprint: String,
        /// Name of the sprint it collides with.
        other: String,
    },

    /// A task was attached to a sprint owned by another project.
    #[error("task \"{task}\" cannot be assigned to sprint \"{sprint}\" from a different project")]
    ProjectMismatch {
        /// Task name.
        task: String,
        /// Sprint name.
        sprint: String,
    },

    /// The lifecycle state machine does not permit the transition.
    #[error("invalid sprint state transition for {sprint_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Sprint identifier.
        sprint_id: SprintId,
        /// Current state.
        from: SprintState,
        /// Requested state.
        to: SprintState,
    },

    /// A sprint cannot start with an empty task set.
    #[error("cannot start sprint \"{0}\" without tasks, add tasks first")]
    StartWithoutTasks(String),

    /// The move disposition was confirmed without a target sprint.
    #[error("select a sprint to move the incomplete tasks to")]
    MissingTargetSprint,

    /// The chosen target sprint is not a valid destination.
    #[error("sprint {target} cannot receive tasks from sprint {completing}: {reason}")]
    InvalidTargetSprint {
        /// Sprint being completed.
        completing: SprintId,
        /// Rejected target sprint.
        target: SprintId,
        /// Why the target was rejected.
        reason: &'static str,
    },

    /// Direct task assignment requires a draft or active sprint.
    #[error("sprint \"{name}\" is {state} and does not accept new tasks")]
    SprintClosedForAssignment {
        /// Sprint name.
        name: String,
        /// Current sprint state.
        state: SprintState,
    },

    /// The task is not part of the backlog offered by the workflow.
    #[error("task {0} is not an unassigned backlog task of this project")]
    TaskNotInBacklog(TaskId),
}

impl SprintDomainError {
    /// Classifies the error as a usage or validation rejection.
    #[must_use]
    pub const fn category(&self) -> SprintErrorCategory {
        match self {
            Self::InvalidStateTransition { .. }
            | Self::StartWithoutTasks(_)
            | Self::MissingTargetSprint
            | Self::SprintClosedForAssignment { .. }
            | Self::TaskNotInBacklog(_) => SprintErrorCategory::Usage,
            Self::EmptySprintName
            | Self::EndBeforeStart { .. }
            | Self::DurationExceeded { .. }
            | Self::SprintOverlap { .. }
            | Self::ProjectMismatch { .. }
            | Self::InvalidTargetSprint { .. } => SprintErrorCategory::Validation,
        }
    }
}

/// Error returned while parsing sprint states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sprint state: {0}")]
pub struct ParseSprintStateError(pub String);

/// Error returned while parsing a completion disposition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown incomplete-task disposition: {0}")]
pub struct ParseDispositionError(pub String);
