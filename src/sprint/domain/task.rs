//! Sprint-facing view of tasks held by the external task store.

use super::{ProjectId, Sprint, SprintDomainError, SprintId, SprintState, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// Unitless effort estimate, conventionally on a Fibonacci scale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StoryPoints(u32);

impl StoryPoints {
    /// No estimate.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw point value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw point value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Sum for StoryPoints {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, points| Self(acc.0.saturating_add(points.0)))
    }
}

impl fmt::Display for StoryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pipeline column a task currently sits in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStage {
    name: String,
    folded: bool,
}

impl TaskStage {
    /// Creates an open (unfolded) stage.
    #[must_use]
    pub fn open(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folded: false,
        }
    }

    /// Creates a folded stage, which marks its tasks as complete.
    #[must_use]
    pub fn folded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folded: true,
        }
    }

    /// Returns the stage name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the stage is a terminal column.
    #[must_use]
    pub const fn is_folded(&self) -> bool {
        self.folded
    }
}

impl Default for TaskStage {
    fn default() -> Self {
        Self::open("New")
    }
}

/// Task record with the sprint fields this crate maintains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    id: TaskId,
    project_id: ProjectId,
    name: String,
    stage: TaskStage,
    story_points: StoryPoints,
    sprint_id: Option<SprintId>,
    sprint_state: Option<SprintState>,
}

impl TaskRecord {
    /// Creates an unestimated backlog task in the default stage.
    #[must_use]
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            project_id,
            name: name.into(),
            stage: TaskStage::default(),
            story_points: StoryPoints::ZERO,
            sprint_id: None,
            sprint_state: None,
        }
    }

    /// Sets the story point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = StoryPoints::new(points);
        self
    }

    /// Sets the pipeline stage.
    #[must_use]
    pub fn with_stage(mut self, stage: TaskStage) -> Self {
        self.stage = stage;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current stage.
    #[must_use]
    pub const fn stage(&self) -> &TaskStage {
        &self.stage
    }

    /// Returns the story point estimate.
    #[must_use]
    pub const fn story_points(&self) -> StoryPoints {
        self.story_points
    }

    /// Returns the sprint the task is planned into, if any.
    #[must_use]
    pub const fn sprint_id(&self) -> Option<SprintId> {
        self.sprint_id
    }

    /// Returns the mirrored state of the referenced sprint.
    #[must_use]
    pub const fn sprint_state(&self) -> Option<SprintState> {
        self.sprint_state
    }

    /// Returns whether the task sits in a folded stage.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.stage.is_folded()
    }

    /// Returns whether the task belongs to no sprint.
    #[must_use]
    pub const fn is_backlog(&self) -> bool {
        self.sprint_id.is_none()
    }

    /// Moves the task into another pipeline stage.
    pub fn set_stage(&mut self, stage: TaskStage) {
        self.stage = stage;
    }

    /// Replaces the story point estimate.
    pub const fn set_story_points(&mut self, points: StoryPoints) {
        self.story_points = points;
    }

    /// Plans the task into `sprint`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::ProjectMismatch`] when the sprint belongs
    /// to a different project.
    pub fn assign_to(&mut self, sprint: &Sprint) -> Result<(), SprintDomainError> {
        ensure_same_project(self, self.project_id, sprint)?;
        self.sprint_id = Some(sprint.id());
        self.sprint_state = Some(sprint.state());
        Ok(())
    }

    /// Returns the task to the project backlog.
    pub const fn clear_sprint(&mut self) {
        self.sprint_id = None;
        self.sprint_state = None;
    }

    /// Overwrites the sprint reference without the project check.
    ///
    /// Meant for task stores applying bulk writes the caller has already
    /// validated.
    pub const fn set_sprint_reference(&mut self, reference: Option<(SprintId, SprintState)>) {
        match reference {
            Some((sprint_id, state)) => {
                self.sprint_id = Some(sprint_id);
                self.sprint_state = Some(state);
            }
            None => self.clear_sprint(),
        }
    }

    /// Refreshes the mirrored sprint state.
    pub const fn mirror_sprint_state(&mut self, state: SprintState) {
        if self.sprint_id.is_some() {
            self.sprint_state = Some(state);
        }
    }

    /// Moves the task to another project.
    ///
    /// `current_sprint` must be the sprint referenced by the task, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::ProjectMismatch`] when the task would
    /// remain attached to a sprint of another project.
    pub fn move_to_project(
        &mut self,
        project_id: ProjectId,
        current_sprint: Option<&Sprint>,
    ) -> Result<(), SprintDomainError> {
        if let Some(sprint) = current_sprint {
            ensure_same_project(self, project_id, sprint)?;
        }
        self.project_id = project_id;
        Ok(())
    }
}

fn ensure_same_project(
    task: &TaskRecord,
    project_id: ProjectId,
    sprint: &Sprint,
) -> Result<(), SprintDomainError> {
    if sprint.project_id() == project_id {
        return Ok(());
    }
    Err(SprintDomainError::ProjectMismatch {
        task: task.name.clone(),
        sprint: sprint.name().to_owned(),
    })
}
