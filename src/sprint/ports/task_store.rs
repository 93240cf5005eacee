//! Port onto the external task store.

use crate::sprint::domain::{ProjectId, SprintId, SprintState, TaskId, TaskRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Sprint reference written onto tasks by bulk assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintAssignment {
    /// Sprint the tasks now belong to.
    pub sprint_id: SprintId,
    /// State mirrored onto the tasks.
    pub sprint_state: SprintState,
}

/// Task store contract required by sprint planning.
///
/// Bulk writes are all-or-nothing: when any identifier is unknown the store
/// must leave every task untouched.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the identifier exists.
    async fn store(&self, task: &TaskRecord) -> TaskStoreResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, task: &TaskRecord) -> TaskStoreResult<()>;

    /// Finds a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<TaskRecord>>;

    /// Returns every task referencing the sprint.
    async fn find_by_sprint(&self, sprint_id: SprintId) -> TaskStoreResult<Vec<TaskRecord>>;

    /// Returns the project's tasks that reference no sprint.
    async fn find_backlog(&self, project_id: ProjectId) -> TaskStoreResult<Vec<TaskRecord>>;

    /// Counts the project's tasks that reference no sprint.
    async fn count_backlog(&self, project_id: ProjectId) -> TaskStoreResult<usize>;

    /// Sets or clears the sprint reference on every listed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] for the first unknown task, in
    /// which case nothing is written.
    async fn assign_sprint(
        &self,
        task_ids: &[TaskId],
        assignment: Option<SprintAssignment>,
    ) -> TaskStoreResult<()>;

    /// Mirrors a sprint's new state onto every task referencing it.
    async fn mirror_sprint_state(
        &self,
        sprint_id: SprintId,
        state: SprintState,
    ) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
