//! Service layer for sprint creation, maintenance and lifecycle transitions.

use crate::sprint::{
    domain::{
        CompanyId, CompletionOutcome, CompletionWorkflow, OperatorContext, ProjectId, Sprint,
        SprintDomainError, SprintId, SprintName, SprintNote, SprintPeriod, SprintPolicy,
        SprintState, TaskId, TaskRecord, UserId, velocity,
    },
    ports::{
        SprintAuditSink, SprintRepository, SprintRepositoryError, TaskStore, TaskStoreError,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSprintRequest {
    project_id: ProjectId,
    name: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    goal: Option<String>,
    owner: Option<UserId>,
    company: Option<CompanyId>,
    color: u32,
}

impl CreateSprintRequest {
    /// Creates a request with the required sprint fields.
    ///
    /// Without an explicit end date the sprint spans the policy's default
    /// length.
    #[must_use]
    pub fn new(project_id: ProjectId, name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            project_id,
            name: name.into(),
            start_date,
            end_date: None,
            goal: None,
            owner: None,
            company: None,
            color: 0,
        }
    }

    /// Sets the last day of the sprint.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Sets the sprint goal.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// Sets the responsible user instead of the operator.
    #[must_use]
    pub const fn with_owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the owning organisation instead of the operator's.
    #[must_use]
    pub const fn with_company(mut self, company: CompanyId) -> Self {
        self.company = Some(company);
        self
    }

    /// Sets the display colour index.
    #[must_use]
    pub const fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }
}

/// Request payload for editing an existing sprint.
///
/// Fields left unset keep their current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSprintRequest {
    sprint_id: SprintId,
    name: Option<String>,
    dates: Option<(NaiveDate, NaiveDate)>,
    goal: Option<Option<String>>,
    owner: Option<Option<UserId>>,
    color: Option<u32>,
}

impl UpdateSprintRequest {
    /// Creates an empty edit for `sprint_id`.
    #[must_use]
    pub const fn new(sprint_id: SprintId) -> Self {
        Self {
            sprint_id,
            name: None,
            dates: None,
            goal: None,
            owner: None,
            color: None,
        }
    }

    /// Renames the sprint.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Moves the sprint to a new date range.
    #[must_use]
    pub const fn with_dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.dates = Some((start_date, end_date));
        self
    }

    /// Replaces the goal.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(Some(goal.into()));
        self
    }

    /// Removes the goal.
    #[must_use]
    pub fn without_goal(mut self) -> Self {
        self.goal = Some(None);
        self
    }

    /// Replaces the responsible user.
    #[must_use]
    pub const fn with_owner(mut self, owner: Option<UserId>) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Replaces the display colour index.
    #[must_use]
    pub const fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }
}

/// Service-level errors for sprint operations.
#[derive(Debug, Error)]
pub enum SprintServiceError {
    /// A domain rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] SprintDomainError),
    /// Sprint repository operation failed.
    #[error(transparent)]
    Repository(#[from] SprintRepositoryError),
    /// Task store operation failed.
    #[error(transparent)]
    TaskStore(#[from] TaskStoreError),
    /// No sprint exists with the given identifier.
    #[error("sprint {0} not found")]
    SprintNotFound(SprintId),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
}

impl SprintServiceError {
    /// Returns the domain rejection, when the error is one.
    #[must_use]
    pub const fn as_domain(&self) -> Option<&SprintDomainError> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for sprint service operations.
pub type SprintServiceResult<T> = Result<T, SprintServiceError>;

/// Sprint orchestration service.
///
/// Runs every presented sprint operation against the sprint repository, the
/// external task store and the audit sink. Derived figures are computed on
/// read, so no operation needs to refresh cached metrics.
#[derive(Clone)]
pub struct SprintService<S, T, A, C>
where
    S: SprintRepository,
    T: TaskStore,
    A: SprintAuditSink,
    C: Clock + Send + Sync,
{
    pub(super) sprints: Arc<S>,
    pub(super) tasks: Arc<T>,
    pub(super) audit: Arc<A>,
    pub(super) clock: Arc<C>,
    pub(super) context: OperatorContext,
    pub(super) policy: SprintPolicy,
}

impl<S, T, A, C> SprintService<S, T, A, C>
where
    S: SprintRepository,
    T: TaskStore,
    A: SprintAuditSink,
    C: Clock + Send + Sync,
{
    /// Creates a service using the default [`SprintPolicy`].
    #[must_use]
    pub fn new(
        sprints: Arc<S>,
        tasks: Arc<T>,
        audit: Arc<A>,
        clock: Arc<C>,
        context: OperatorContext,
    ) -> Self {
        Self {
            sprints,
            tasks,
            audit,
            clock,
            context,
            policy: SprintPolicy::default(),
        }
    }

    /// Replaces the scheduling policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: SprintPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the scheduling policy in use.
    #[must_use]
    pub const fn policy(&self) -> &SprintPolicy {
        &self.policy
    }

    pub(super) async fn find_sprint_or_error(
        &self,
        sprint_id: SprintId,
    ) -> SprintServiceResult<Sprint> {
        self.sprints
            .find_by_id(sprint_id)
            .await?
            .ok_or(SprintServiceError::SprintNotFound(sprint_id))
    }

    pub(super) async fn find_task_or_error(
        &self,
        task_id: TaskId,
    ) -> SprintServiceResult<TaskRecord> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(SprintServiceError::TaskNotFound(task_id))
    }

    /// Creates a draft sprint.
    ///
    /// Owner and company default to the operator context.
    ///
    /// # Errors
    ///
    /// Returns [`SprintServiceError::Domain`] for a blank name, an invalid
    /// date range or an overlap with another open sprint of the project, and
    /// [`SprintServiceError::Repository`] when the name is taken or
    /// persistence fails.
    pub async fn create_sprint(&self, request: CreateSprintRequest) -> SprintServiceResult<Sprint> {
        let name = SprintName::new(request.name)?;
        let period = match request.end_date {
            Some(end_date) => SprintPeriod::new(request.start_date, end_date, &self.policy)?,
            None => SprintPeriod::starting(request.start_date, &self.policy)?,
        };

        let mut sprint = Sprint::new(
            request.project_id,
            request.company.unwrap_or(self.context.company),
            name,
            period,
            &*self.clock,
        )
        .with_owner(request.owner.unwrap_or(self.context.user))
        .with_color(request.color);
        if let Some(goal) = request.goal {
            sprint = sprint.with_goal(goal);
        }

        let siblings = self.sprints.find_by_project(sprint.project_id()).await?;
        sprint.ensure_no_overlap(&siblings)?;
        self.sprints.store(&sprint).await?;

        info!(
            sprint_id = %sprint.id(),
            project_id = %sprint.project_id(),
            name = sprint.name(),
            "sprint created"
        );
        Ok(sprint)
    }

    /// Applies an edit to a sprint.
    ///
    /// Every field is validated before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`SprintServiceError::SprintNotFound`] for an unknown sprint,
    /// domain errors for invalid names, dates or overlaps, and repository
    /// errors for duplicate names or persistence failures.
    pub async fn update_sprint(&self, request: UpdateSprintRequest) -> SprintServiceResult<Sprint> {
        let mut sprint = self.find_sprint_or_error(request.sprint_id).await?;
        let name = request.name.map(SprintName::new).transpose()?;
        let period = request
            .dates
            .map(|(start, end)| SprintPeriod::new(start, end, &self.policy))
            .transpose()?;

        let clock = &*self.clock;
        if let Some(validated_name) = name {
            sprint.rename(validated_name, clock);
        }
        if let Some(goal) = request.goal {
            sprint.set_goal(goal, clock);
        }
        if let Some(owner) = request.owner {
            sprint.set_owner(owner, clock);
        }
        if let Some(color) = request.color {
            sprint.set_color(color, clock);
        }
        if let Some(validated_period) = period {
            sprint.reschedule(validated_period, clock);
            let siblings = self.sprints.find_by_project(sprint.project_id()).await?;
            sprint.ensure_no_overlap(&siblings)?;
        }

        self.sprints.update(&sprint).await?;
        info!(sprint_id = %sprint.id(), "sprint updated");
        Ok(sprint)
    }

    /// Finds a sprint by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SprintServiceError::Repository`] when lookup fails.
    pub async fn find_sprint(&self, sprint_id: SprintId) -> SprintServiceResult<Option<Sprint>> {
        Ok(self.sprints.find_by_id(sprint_id).await?)
    }

    /// Starts a draft sprint that has at least one task.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::StartWithoutTasks`] for an empty sprint,
    /// [`SprintDomainError::InvalidStateTransition`] unless the sprint is a
    /// draft, and not-found or persistence errors.
    pub async fn start(&self, sprint_id: SprintId) -> SprintServiceResult<Sprint> {
        let mut sprint = self.find_sprint_or_error(sprint_id).await?;
        let tasks = self.tasks.find_by_sprint(sprint_id).await?;
        sprint.start(tasks.len(), &*self.clock)?;
        self.persist_transition(&sprint).await?;

        info!(sprint_id = %sprint_id, task_count = tasks.len(), "sprint started");
        self.record_note(SprintNote::started(sprint_id, self.context.user, &*self.clock))
            .await;
        Ok(sprint)
    }

    /// Requests completion of a sprint.
    ///
    /// When every task is in a folded stage the sprint becomes `done`
    /// immediately. Otherwise nothing changes and a [`CompletionWorkflow`]
    /// holding the unfinished tasks is returned for the caller to resolve via
    /// [`SprintService::confirm_completion`].
    ///
    /// Completing a sprint that is already `done` finalizes it again. The
    /// velocity is recomputed and another completion note is appended.
    ///
    /// # Errors
    ///
    /// Returns not-found or persistence errors.
    pub async fn complete(&self, sprint_id: SprintId) -> SprintServiceResult<CompletionOutcome> {
        let sprint = self.find_sprint_or_error(sprint_id).await?;
        let tasks = self.tasks.find_by_sprint(sprint_id).await?;
        let incomplete: Vec<&TaskRecord> = tasks.iter().filter(|task| !task.is_complete()).collect();

        if incomplete.is_empty() {
            let completed = self.finalize_completion(sprint).await?;
            return Ok(CompletionOutcome::Completed(completed));
        }

        info!(
            sprint_id = %sprint_id,
            incomplete_tasks = incomplete.len(),
            "sprint completion awaits a disposition for unfinished tasks"
        );
        Ok(CompletionOutcome::PendingDisposition(CompletionWorkflow::new(
            &sprint, incomplete,
        )))
    }

    /// Cancels a sprint from any state.
    ///
    /// # Errors
    ///
    /// Returns not-found or persistence errors.
    pub async fn cancel(&self, sprint_id: SprintId) -> SprintServiceResult<Sprint> {
        let mut sprint = self.find_sprint_or_error(sprint_id).await?;
        sprint.cancel(&*self.clock);
        self.persist_transition(&sprint).await?;

        info!(sprint_id = %sprint_id, "sprint cancelled");
        self.record_note(SprintNote::cancelled(sprint_id, self.context.user, &*self.clock))
            .await;
        Ok(sprint)
    }

    /// Returns a sprint to `draft` from any state.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::SprintOverlap`] when the sprint would
    /// collide with another open sprint of the project once it is a draft
    /// again, and not-found or persistence errors.
    pub async fn reset_to_draft(&self, sprint_id: SprintId) -> SprintServiceResult<Sprint> {
        let mut sprint = self.find_sprint_or_error(sprint_id).await?;
        sprint.reset_to_draft(&*self.clock);
        let siblings = self.sprints.find_by_project(sprint.project_id()).await?;
        sprint.ensure_no_overlap(&siblings)?;
        self.persist_transition(&sprint).await?;

        info!(sprint_id = %sprint_id, "sprint reset to draft");
        Ok(sprint)
    }

    /// Marks the sprint done and records the velocity note.
    ///
    /// Velocity is computed over the tasks still referencing the sprint after
    /// any disposition has been applied. Each call appends its own note.
    pub(super) async fn finalize_completion(
        &self,
        mut sprint: Sprint,
    ) -> SprintServiceResult<Sprint> {
        sprint.mark_done(&*self.clock);
        self.persist_transition(&sprint).await?;

        let tasks = self.tasks.find_by_sprint(sprint.id()).await?;
        let completed_points = tasks
            .iter()
            .filter(|task| task.is_complete())
            .map(TaskRecord::story_points)
            .sum();
        let final_velocity = velocity(
            SprintState::Done,
            completed_points,
            sprint.period().duration_days(),
        );

        info!(sprint_id = %sprint.id(), velocity = final_velocity, "sprint completed");
        self.record_note(SprintNote::completed(
            sprint.id(),
            final_velocity,
            self.context.user,
            &*self.clock,
        ))
        .await;
        Ok(sprint)
    }

    async fn persist_transition(&self, sprint: &Sprint) -> SprintServiceResult<()> {
        self.sprints.update(sprint).await?;
        self.tasks
            .mirror_sprint_state(sprint.id(), sprint.state())
            .await?;
        Ok(())
    }

    /// Appends a note, logging rather than propagating sink failures.
    async fn record_note(&self, note: SprintNote) {
        if let Err(err) = self.audit.record(&note).await {
            warn!(
                sprint_id = %note.sprint_id,
                error = %err,
                "failed to record sprint note"
            );
        }
    }
}
