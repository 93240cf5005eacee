//! In-memory stand-in for the external task store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sprint::{
    domain::{ProjectId, SprintId, SprintState, TaskId, TaskRecord},
    ports::{SprintAssignment, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<HashMap<TaskId, TaskRecord>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory task store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

/// Collects tasks matching `predicate` in a stable order.
fn collect_sorted(
    tasks: &HashMap<TaskId, TaskRecord>,
    predicate: impl Fn(&TaskRecord) -> bool,
) -> Vec<TaskRecord> {
    let mut matching: Vec<TaskRecord> = tasks
        .values()
        .filter(|task| predicate(task))
        .cloned()
        .collect();
    matching.sort_by(|left, right| {
        left.name()
            .cmp(right.name())
            .then_with(|| left.id().cmp(&right.id()))
    });
    matching
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn store(&self, task: &TaskRecord) -> TaskStoreResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &TaskRecord) -> TaskStoreResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        let slot = tasks
            .get_mut(&task.id())
            .ok_or(TaskStoreError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<TaskRecord>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn find_by_sprint(&self, sprint_id: SprintId) -> TaskStoreResult<Vec<TaskRecord>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(collect_sorted(&tasks, |task| task.sprint_id() == Some(sprint_id)))
    }

    async fn find_backlog(&self, project_id: ProjectId) -> TaskStoreResult<Vec<TaskRecord>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(collect_sorted(&tasks, |task| {
            task.project_id() == project_id && task.is_backlog()
        }))
    }

    async fn count_backlog(&self, project_id: ProjectId) -> TaskStoreResult<usize> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(tasks
            .values()
            .filter(|task| task.project_id() == project_id && task.is_backlog())
            .count())
    }

    async fn assign_sprint(
        &self,
        task_ids: &[TaskId],
        assignment: Option<SprintAssignment>,
    ) -> TaskStoreResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        if let Some(missing) = task_ids.iter().find(|id| !tasks.contains_key(*id)) {
            return Err(TaskStoreError::NotFound(*missing));
        }
        for id in task_ids {
            let Some(task) = tasks.get_mut(id) else {
                continue;
            };
            task.set_sprint_reference(assignment.map(|a| (a.sprint_id, a.sprint_state)));
        }
        Ok(())
    }

    async fn mirror_sprint_state(
        &self,
        sprint_id: SprintId,
        state: SprintState,
    ) -> TaskStoreResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        tasks
            .values_mut()
            .filter(|task| task.sprint_id() == Some(sprint_id))
            .for_each(|task| task.mirror_sprint_state(state));
        Ok(())
    }
}
