//! Read-side queries: sprint metrics and project views.

use super::lifecycle::{SprintService, SprintServiceResult};
use crate::sprint::{
    domain::{ProjectId, ProjectSprintOverview, Sprint, SprintId, SprintMetrics},
    ports::{SprintAuditSink, SprintRepository, TaskStore},
};
use mockable::Clock;
use tracing::debug;

impl<S, T, A, C> SprintService<S, T, A, C>
where
    S: SprintRepository,
    T: TaskStore,
    A: SprintAuditSink,
    C: Clock + Send + Sync,
{
    /// Computes the sprint's derived figures as of today.
    ///
    /// # Errors
    ///
    /// Returns not-found or persistence errors.
    pub async fn metrics(&self, sprint_id: SprintId) -> SprintServiceResult<SprintMetrics> {
        let sprint = self.find_sprint_or_error(sprint_id).await?;
        let tasks = self.tasks.find_by_sprint(sprint_id).await?;
        let backlog_task_count = self.tasks.count_backlog(sprint.project_id()).await?;
        let today = self.clock.local().date_naive();

        let metrics = SprintMetrics::compute(&sprint, &tasks, backlog_task_count, today);
        debug!(
            sprint_id = %sprint_id,
            task_count = metrics.task_count,
            progress = metrics.progress,
            "computed sprint metrics"
        );
        Ok(metrics)
    }

    /// Lists a project's sprints, latest start date first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_project_sprints(
        &self,
        project_id: ProjectId,
    ) -> SprintServiceResult<Vec<Sprint>> {
        Ok(self.sprints.find_by_project(project_id).await?)
    }

    /// Summarises a project's sprints.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn project_overview(
        &self,
        project_id: ProjectId,
    ) -> SprintServiceResult<ProjectSprintOverview> {
        let sprints = self.sprints.find_by_project(project_id).await?;
        Ok(ProjectSprintOverview::from_sprints(project_id, &sprints))
    }
}
