//! Transient state for pulling backlog tasks into a sprint.

use super::{ProjectId, Sprint, SprintDomainError, SprintId, TaskId, TaskRecord};
use std::collections::BTreeSet;

/// Selection of unassigned project tasks to plan into a sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklogAssignment {
    sprint_id: SprintId,
    project_id: ProjectId,
    candidates: Vec<TaskId>,
    selected: BTreeSet<TaskId>,
}

impl BacklogAssignment {
    /// Opens a selection for `sprint`.
    ///
    /// Tasks from other projects or already planned into a sprint are
    /// dropped from the candidate set.
    #[must_use]
    pub fn new<'a>(sprint: &Sprint, backlog: impl IntoIterator<Item = &'a TaskRecord>) -> Self {
        let candidates = backlog
            .into_iter()
            .filter(|task| task.project_id() == sprint.project_id() && task.is_backlog())
            .map(TaskRecord::id)
            .collect();
        Self {
            sprint_id: sprint.id(),
            project_id: sprint.project_id(),
            candidates,
            selected: BTreeSet::new(),
        }
    }

    /// Returns the receiving sprint.
    #[must_use]
    pub const fn sprint_id(&self) -> SprintId {
        self.sprint_id
    }

    /// Returns the project the backlog was drawn from.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the tasks that may be selected.
    #[must_use]
    pub fn candidates(&self) -> &[TaskId] {
        &self.candidates
    }

    /// Returns the tasks selected so far.
    #[must_use]
    pub fn selected(&self) -> Vec<TaskId> {
        self.selected.iter().copied().collect()
    }

    /// Adds a candidate to the selection.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::TaskNotInBacklog`] when `task_id` is not a
    /// candidate.
    pub fn select(&mut self, task_id: TaskId) -> Result<(), SprintDomainError> {
        if !self.candidates.contains(&task_id) {
            return Err(SprintDomainError::TaskNotInBacklog(task_id));
        }
        self.selected.insert(task_id);
        Ok(())
    }

    /// Selects every candidate.
    pub fn select_all(&mut self) {
        self.selected.extend(self.candidates.iter().copied());
    }

    /// Removes a task from the selection.
    pub fn deselect(&mut self, task_id: TaskId) {
        self.selected.remove(&task_id);
    }
}
