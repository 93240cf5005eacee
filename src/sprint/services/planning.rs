//! Task planning operations: backlog assignment and single-task moves.

use super::lifecycle::{SprintService, SprintServiceResult};
use crate::sprint::{
    domain::{BacklogAssignment, ProjectId, SprintDomainError, SprintId, TaskId, TaskRecord},
    ports::{SprintAssignment, SprintAuditSink, SprintRepository, TaskStore},
};
use mockable::Clock;
use tracing::info;

impl<S, T, A, C> SprintService<S, T, A, C>
where
    S: SprintRepository,
    T: TaskStore,
    A: SprintAuditSink,
    C: Clock + Send + Sync,
{
    /// Opens a backlog selection for a sprint.
    ///
    /// # Errors
    ///
    /// Returns not-found or persistence errors.
    pub async fn open_backlog_assignment(
        &self,
        sprint_id: SprintId,
    ) -> SprintServiceResult<BacklogAssignment> {
        let sprint = self.find_sprint_or_error(sprint_id).await?;
        let backlog = self.tasks.find_backlog(sprint.project_id()).await?;
        Ok(BacklogAssignment::new(&sprint, &backlog))
    }

    /// Plans the selected backlog tasks into the sprint.
    ///
    /// Returns the updated tasks. Every selected task is checked against the
    /// sprint's project before any of them is written.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::ProjectMismatch`] when a selected task has
    /// since moved to another project, and not-found or persistence errors.
    pub async fn confirm_backlog_assignment(
        &self,
        assignment: BacklogAssignment,
    ) -> SprintServiceResult<Vec<TaskRecord>> {
        let sprint = self.find_sprint_or_error(assignment.sprint_id()).await?;
        let selected = assignment.selected();

        let mut planned = Vec::with_capacity(selected.len());
        for task_id in &selected {
            let mut task = self.find_task_or_error(*task_id).await?;
            task.assign_to(&sprint)?;
            planned.push(task);
        }

        if !selected.is_empty() {
            let sprint_assignment = SprintAssignment {
                sprint_id: sprint.id(),
                sprint_state: sprint.state(),
            };
            self.tasks
                .assign_sprint(&selected, Some(sprint_assignment))
                .await?;
        }

        info!(
            sprint_id = %sprint.id(),
            added_tasks = planned.len(),
            "backlog tasks added to sprint"
        );
        Ok(planned)
    }

    /// Plans a single task into an open sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::SprintClosedForAssignment`] unless the
    /// sprint is draft or active, [`SprintDomainError::ProjectMismatch`] when
    /// the sprint belongs to another project, and not-found or persistence
    /// errors.
    pub async fn assign_task(
        &self,
        task_id: TaskId,
        sprint_id: SprintId,
    ) -> SprintServiceResult<TaskRecord> {
        let sprint = self.find_sprint_or_error(sprint_id).await?;
        if !sprint.state().is_open() {
            return Err(SprintDomainError::SprintClosedForAssignment {
                name: sprint.name().to_owned(),
                state: sprint.state(),
            }
            .into());
        }
        let mut task = self.find_task_or_error(task_id).await?;
        task.assign_to(&sprint)?;
        self.tasks.update(&task).await?;

        info!(task_id = %task_id, sprint_id = %sprint_id, "task assigned to sprint");
        Ok(task)
    }

    /// Returns a task to its project backlog.
    ///
    /// # Errors
    ///
    /// Returns not-found or persistence errors.
    pub async fn unassign_task(&self, task_id: TaskId) -> SprintServiceResult<TaskRecord> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.clear_sprint();
        self.tasks.update(&task).await?;

        info!(task_id = %task_id, "task returned to backlog");
        Ok(task)
    }

    /// Moves a task to another project.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::ProjectMismatch`] when the task is still
    /// planned into a sprint of its current project, and not-found or
    /// persistence errors.
    pub async fn move_task_to_project(
        &self,
        task_id: TaskId,
        project_id: ProjectId,
    ) -> SprintServiceResult<TaskRecord> {
        let mut task = self.find_task_or_error(task_id).await?;
        let current_sprint = match task.sprint_id() {
            Some(sprint_id) => Some(self.find_sprint_or_error(sprint_id).await?),
            None => None,
        };
        task.move_to_project(project_id, current_sprint.as_ref())?;
        self.tasks.update(&task).await?;

        info!(task_id = %task_id, project_id = %project_id, "task moved to project");
        Ok(task)
    }

    /// Lists the tasks planned into a sprint.
    ///
    /// # Errors
    ///
    /// Returns not-found or persistence errors.
    pub async fn sprint_tasks(&self, sprint_id: SprintId) -> SprintServiceResult<Vec<TaskRecord>> {
        let sprint = self.find_sprint_or_error(sprint_id).await?;
        Ok(self.tasks.find_by_sprint(sprint.id()).await?)
    }
}
