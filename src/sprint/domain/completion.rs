//! Transient state for completing a sprint that still holds unfinished work.

use super::{
    ParseDispositionError, ProjectId, Sprint, SprintDomainError, SprintId, SprintState, TaskId,
    TaskRecord,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happens to unfinished tasks when their sprint is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncompleteTaskDisposition {
    /// Reassign the tasks to a draft sprint of the same project.
    MoveToSprint,
    /// Return the tasks to the project backlog.
    #[default]
    MoveToBacklog,
    /// Leave the tasks attached to the completed sprint.
    KeepInSprint,
}

impl IncompleteTaskDisposition {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MoveToSprint => "move",
            Self::MoveToBacklog => "backlog",
            Self::KeepInSprint => "keep",
        }
    }
}

impl fmt::Display for IncompleteTaskDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for IncompleteTaskDisposition {
    type Error = ParseDispositionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "move" => Ok(Self::MoveToSprint),
            "backlog" => Ok(Self::MoveToBacklog),
            "keep" => Ok(Self::KeepInSprint),
            _ => Err(ParseDispositionError(value.to_owned())),
        }
    }
}

/// Disposition with its target resolved, ready to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedDisposition {
    /// Reassign to the given sprint.
    Move(SprintId),
    /// Clear the sprint reference.
    Backlog,
    /// Leave tasks untouched.
    Keep,
}

/// Pending completion of a sprint whose task set is not fully done.
///
/// Produced by the completion request and consumed by its confirmation. The
/// incomplete task set is a snapshot taken when the request was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionWorkflow {
    sprint_id: SprintId,
    project_id: ProjectId,
    incomplete_tasks: Vec<TaskId>,
    disposition: IncompleteTaskDisposition,
    target_sprint: Option<SprintId>,
}

impl CompletionWorkflow {
    /// Opens a workflow for `sprint` with the given unfinished tasks.
    #[must_use]
    pub fn new<'a>(sprint: &Sprint, incomplete: impl IntoIterator<Item = &'a TaskRecord>) -> Self {
        Self {
            sprint_id: sprint.id(),
            project_id: sprint.project_id(),
            incomplete_tasks: incomplete.into_iter().map(TaskRecord::id).collect(),
            disposition: IncompleteTaskDisposition::default(),
            target_sprint: None,
        }
    }

    /// Returns the sprint being completed.
    #[must_use]
    pub const fn sprint_id(&self) -> SprintId {
        self.sprint_id
    }

    /// Returns the project of the sprint being completed.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the unfinished tasks captured when the workflow opened.
    #[must_use]
    pub fn incomplete_task_ids(&self) -> &[TaskId] {
        &self.incomplete_tasks
    }

    /// Returns how many unfinished tasks the workflow covers.
    #[must_use]
    pub fn incomplete_task_count(&self) -> usize {
        self.incomplete_tasks.len()
    }

    /// Returns the chosen disposition.
    #[must_use]
    pub const fn disposition(&self) -> IncompleteTaskDisposition {
        self.disposition
    }

    /// Returns the chosen target sprint, if any.
    #[must_use]
    pub const fn target_sprint(&self) -> Option<SprintId> {
        self.target_sprint
    }

    /// Chooses a disposition.
    ///
    /// Any choice other than [`IncompleteTaskDisposition::MoveToSprint`]
    /// clears a previously selected target.
    pub const fn choose(&mut self, disposition: IncompleteTaskDisposition) {
        self.disposition = disposition;
        if !matches!(disposition, IncompleteTaskDisposition::MoveToSprint) {
            self.target_sprint = None;
        }
    }

    /// Chooses to move the unfinished tasks into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTargetSprint`] when `target` is not
    /// a candidate (see [`CompletionWorkflow::check_target`]). The workflow is
    /// unchanged on error.
    pub fn move_to(&mut self, target: &Sprint) -> Result<(), SprintDomainError> {
        self.check_target(target)?;
        self.disposition = IncompleteTaskDisposition::MoveToSprint;
        self.target_sprint = Some(target.id());
        Ok(())
    }

    /// Returns whether `sprint` may receive the unfinished tasks.
    #[must_use]
    pub fn is_candidate_target(&self, sprint: &Sprint) -> bool {
        self.check_target(sprint).is_ok()
    }

    /// Filters `sprints` down to valid move targets.
    #[must_use]
    pub fn candidate_targets<'a>(
        &self,
        sprints: impl IntoIterator<Item = &'a Sprint>,
    ) -> Vec<&'a Sprint> {
        sprints
            .into_iter()
            .filter(|sprint| self.is_candidate_target(sprint))
            .collect()
    }

    /// Checks that `target` is a draft sprint of the same project other than
    /// the source.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTargetSprint`] describing the first
    /// failed condition.
    pub fn check_target(&self, target: &Sprint) -> Result<(), SprintDomainError> {
        let reason = if target.id() == self.sprint_id {
            Some("a sprint cannot receive its own tasks")
        } else if target.project_id() != self.project_id {
            Some("the target belongs to another project")
        } else if target.state() != SprintState::Draft {
            Some("the target is not a draft sprint")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(SprintDomainError::InvalidTargetSprint {
                completing: self.sprint_id,
                target: target.id(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Resolves the choice into an applicable disposition.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::MissingTargetSprint`] when moving was
    /// chosen without a target.
    pub const fn resolve(&self) -> Result<ResolvedDisposition, SprintDomainError> {
        match self.disposition {
            IncompleteTaskDisposition::MoveToSprint => match self.target_sprint {
                Some(target) => Ok(ResolvedDisposition::Move(target)),
                None => Err(SprintDomainError::MissingTargetSprint),
            },
            IncompleteTaskDisposition::MoveToBacklog => Ok(ResolvedDisposition::Backlog),
            IncompleteTaskDisposition::KeepInSprint => Ok(ResolvedDisposition::Keep),
        }
    }
}

/// Result of asking a sprint to complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Every task was done; the sprint is now `done`.
    Completed(Sprint),
    /// Unfinished tasks need a disposition before the sprint can complete.
    PendingDisposition(CompletionWorkflow),
}
