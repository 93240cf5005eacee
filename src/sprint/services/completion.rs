//! Confirmation step of the sprint completion workflow.

use super::lifecycle::{SprintService, SprintServiceResult};
use crate::sprint::{
    domain::{CompletionWorkflow, ResolvedDisposition, Sprint, TaskId, TaskRecord},
    ports::{SprintAssignment, SprintAuditSink, SprintRepository, TaskStore},
};
use mockable::Clock;
use tracing::{debug, info};

impl<S, T, A, C> SprintService<S, T, A, C>
where
    S: SprintRepository,
    T: TaskStore,
    A: SprintAuditSink,
    C: Clock + Send + Sync,
{
    /// Lists the sprints that may receive the workflow's unfinished tasks.
    ///
    /// Only draft sprints of the same project, other than the one being
    /// completed, are offered.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the project's sprints cannot be read.
    pub async fn completion_targets(
        &self,
        workflow: &CompletionWorkflow,
    ) -> SprintServiceResult<Vec<Sprint>> {
        let siblings = self.sprints.find_by_project(workflow.project_id()).await?;
        let targets: Vec<Sprint> = workflow
            .candidate_targets(&siblings)
            .into_iter()
            .cloned()
            .collect();
        debug!(
            sprint_id = %workflow.sprint_id(),
            candidates = targets.len(),
            "filtered completion targets"
        );
        Ok(targets)
    }

    /// Applies the chosen disposition and completes the sprint.
    ///
    /// The workflow's task snapshot is reloaded first. Tasks that have since
    /// left the sprint are skipped so that a disposition never overrides a
    /// later reassignment. Moved tasks are checked against the target's
    /// project before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::MissingTargetSprint`] when moving was
    /// chosen without a target, [`SprintDomainError::InvalidTargetSprint`]
    /// when the target is no longer a draft sprint of the project,
    /// [`SprintDomainError::ProjectMismatch`] when a task no longer shares
    /// the target's project, and not-found or persistence errors. No task is
    /// touched on error.
    ///
    /// [`SprintDomainError::MissingTargetSprint`]: crate::sprint::domain::SprintDomainError::MissingTargetSprint
    /// [`SprintDomainError::InvalidTargetSprint`]: crate::sprint::domain::SprintDomainError::InvalidTargetSprint
    /// [`SprintDomainError::ProjectMismatch`]: crate::sprint::domain::SprintDomainError::ProjectMismatch
    pub async fn confirm_completion(
        &self,
        workflow: CompletionWorkflow,
    ) -> SprintServiceResult<Sprint> {
        let disposition = workflow.resolve()?;
        let sprint = self.find_sprint_or_error(workflow.sprint_id()).await?;
        let mut remaining = self.tasks_still_in(&sprint, &workflow).await?;
        let task_ids: Vec<TaskId> = remaining.iter().map(TaskRecord::id).collect();

        match disposition {
            ResolvedDisposition::Move(target_id) => {
                let target = self.find_sprint_or_error(target_id).await?;
                workflow.check_target(&target)?;
                for task in &mut remaining {
                    task.assign_to(&target)?;
                }
                let assignment = SprintAssignment {
                    sprint_id: target.id(),
                    sprint_state: target.state(),
                };
                self.tasks.assign_sprint(&task_ids, Some(assignment)).await?;
                info!(
                    sprint_id = %sprint.id(),
                    target_sprint_id = %target_id,
                    moved_tasks = task_ids.len(),
                    "moved unfinished tasks to the next sprint"
                );
            }
            ResolvedDisposition::Backlog => {
                self.tasks.assign_sprint(&task_ids, None).await?;
                info!(
                    sprint_id = %sprint.id(),
                    returned_tasks = task_ids.len(),
                    "returned unfinished tasks to the backlog"
                );
            }
            ResolvedDisposition::Keep => {
                debug!(sprint_id = %sprint.id(), "unfinished tasks stay in the sprint");
            }
        }

        self.finalize_completion(sprint).await
    }

    /// Reloads the workflow's snapshot, keeping tasks still planned into
    /// `sprint`.
    async fn tasks_still_in(
        &self,
        sprint: &Sprint,
        workflow: &CompletionWorkflow,
    ) -> SprintServiceResult<Vec<TaskRecord>> {
        let mut remaining = Vec::with_capacity(workflow.incomplete_task_count());
        for task_id in workflow.incomplete_task_ids() {
            match self.tasks.find_by_id(*task_id).await? {
                Some(task) if task.sprint_id() == Some(sprint.id()) => remaining.push(task),
                _ => debug!(
                    sprint_id = %sprint.id(),
                    task_id = %task_id,
                    "skipping task that left the sprint after completion was requested"
                ),
            }
        }
        Ok(remaining)
    }
}
