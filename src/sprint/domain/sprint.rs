//! Sprint aggregate root.

use super::{
    CompanyId, ProjectId, SprintDomainError, SprintId, SprintPeriod, SprintState, UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated sprint name, non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SprintName(String);

impl SprintName {
    /// Creates a trimmed sprint name.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EmptySprintName`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, SprintDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SprintDomainError::EmptySprintName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SprintName {
    type Error = SprintDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SprintName> for String {
    fn from(name: SprintName) -> Self {
        name.0
    }
}

impl AsRef<str> for SprintName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SprintName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sprint aggregate root.
///
/// Deserialising a sprint validates its name and period ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    id: SprintId,
    project_id: ProjectId,
    company_id: CompanyId,
    name: SprintName,
    period: SprintPeriod,
    state: SprintState,
    goal: Option<String>,
    owner: Option<UserId>,
    color: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSprintData {
    /// Persisted sprint identifier.
    pub id: SprintId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Owning organisation.
    pub company_id: CompanyId,
    /// Sprint name.
    pub name: SprintName,
    /// Scheduled date range.
    pub period: SprintPeriod,
    /// Lifecycle state.
    pub state: SprintState,
    /// Free-text sprint goal.
    pub goal: Option<String>,
    /// Responsible user.
    pub owner: Option<UserId>,
    /// Display colour index.
    pub color: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Sprint {
    /// Creates a draft sprint.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        company_id: CompanyId,
        name: SprintName,
        period: SprintPeriod,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: SprintId::new(),
            project_id,
            company_id,
            name,
            period,
            state: SprintState::Draft,
            goal: None,
            owner: None,
            color: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a sprint from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSprintData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            company_id: data.company_id,
            name: data.name,
            period: data.period,
            state: data.state,
            goal: data.goal,
            owner: data.owner,
            color: data.color,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Sets the sprint goal.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// Sets the responsible user.
    #[must_use]
    pub const fn with_owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the display colour index.
    #[must_use]
    pub const fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the owning organisation.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the sprint name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the scheduled date range.
    #[must_use]
    pub const fn period(&self) -> SprintPeriod {
        self.period
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SprintState {
        self.state
    }

    /// Returns the sprint goal, if any.
    #[must_use]
    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    /// Returns the responsible user, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<UserId> {
        self.owner
    }

    /// Returns the display colour index.
    #[must_use]
    pub const fn color(&self) -> u32 {
        self.color
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Starts the sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidStateTransition`] unless the sprint
    /// is a draft, and [`SprintDomainError::StartWithoutTasks`] when
    /// `task_count` is zero. The sprint is unchanged on error.
    pub fn start(
        &mut self,
        task_count: usize,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        self.ensure_can_transition_to(SprintState::Active)?;
        if task_count == 0 {
            return Err(SprintDomainError::StartWithoutTasks(self.name.to_string()));
        }
        self.set_state(SprintState::Active, clock);
        Ok(())
    }

    /// Marks the sprint as done.
    pub fn mark_done(&mut self, clock: &impl Clock) {
        self.set_state(SprintState::Done, clock);
    }

    /// Cancels the sprint.
    pub fn cancel(&mut self, clock: &impl Clock) {
        self.set_state(SprintState::Cancelled, clock);
    }

    /// Returns the sprint to planning.
    ///
    /// Callers must re-run [`Sprint::ensure_no_overlap`] afterwards because a
    /// draft sprint takes part in the overlap check again.
    pub fn reset_to_draft(&mut self, clock: &impl Clock) {
        self.set_state(SprintState::Draft, clock);
    }

    /// Renames the sprint.
    pub fn rename(&mut self, name: SprintName, clock: &impl Clock) {
        self.name = name;
        self.touch(clock);
    }

    /// Moves the sprint to a new date range.
    pub fn reschedule(&mut self, period: SprintPeriod, clock: &impl Clock) {
        self.period = period;
        self.touch(clock);
    }

    /// Replaces the sprint goal.
    pub fn set_goal(&mut self, goal: Option<String>, clock: &impl Clock) {
        self.goal = goal;
        self.touch(clock);
    }

    /// Replaces the responsible user.
    pub fn set_owner(&mut self, owner: Option<UserId>, clock: &impl Clock) {
        self.owner = owner;
        self.touch(clock);
    }

    /// Replaces the display colour index.
    pub fn set_color(&mut self, color: u32, clock: &impl Clock) {
        self.color = color;
        self.touch(clock);
    }

    /// Checks the sprint against its project siblings for date collisions.
    ///
    /// Only open (draft or active) sprints of the same project take part;
    /// `self` is skipped when present in `siblings`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::SprintOverlap`] naming the first sibling
    /// whose range shares a day with this sprint.
    pub fn ensure_no_overlap<'a>(
        &self,
        siblings: impl IntoIterator<Item = &'a Self>,
    ) -> Result<(), SprintDomainError> {
        if !self.state.is_open() {
            return Ok(());
        }
        let collision = siblings.into_iter().find(|other| {
            other.id != self.id
                && other.project_id == self.project_id
                && other.state.is_open()
                && self.period.overlaps(&other.period)
        });
        match collision {
            Some(other) => Err(SprintDomainError::SprintOverlap {
                sprint: self.name.to_string(),
                other: other.name.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn ensure_can_transition_to(&self, target: SprintState) -> Result<(), SprintDomainError> {
        if self.state.can_transition_to(target) {
            return Ok(());
        }
        Err(SprintDomainError::InvalidStateTransition {
            sprint_id: self.id,
            from: self.state,
            to: target,
        })
    }

    fn set_state(&mut self, state: SprintState, clock: &impl Clock) {
        self.state = state;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
