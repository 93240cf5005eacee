//! Derived sprint progress figures.
//!
//! Metrics are pure functions of the sprint, its task set, the project
//! backlog size and the current date. They are computed on read and never
//! stored, so a caller cannot observe stale values.

use super::{Sprint, SprintState, StoryPoints, TaskRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot of a sprint's derived figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprintMetrics {
    /// Number of tasks planned into the sprint.
    pub task_count: u32,
    /// Number of those tasks in a folded stage.
    pub completed_task_count: u32,
    /// Completed share of tasks as a percentage in `[0, 100]`.
    pub progress: f64,
    /// Sum of story points over all tasks.
    pub story_points_total: StoryPoints,
    /// Sum of story points over completed tasks.
    pub story_points_completed: StoryPoints,
    /// Inclusive length of the sprint in days.
    pub duration_days: u32,
    /// Days left until the end date; zero unless the sprint is active.
    pub days_remaining: u32,
    /// Completed points per day, rounded to two decimals; zero unless done.
    pub velocity: f64,
    /// Project tasks not planned into any sprint.
    pub backlog_task_count: u32,
}

impl SprintMetrics {
    /// Computes the metrics for `sprint`.
    ///
    /// `tasks` must be the tasks currently referencing the sprint.
    #[must_use]
    pub fn compute(
        sprint: &Sprint,
        tasks: &[TaskRecord],
        backlog_task_count: usize,
        today: NaiveDate,
    ) -> Self {
        let task_count = saturating_count(tasks.len());
        let completed_task_count =
            saturating_count(tasks.iter().filter(|task| task.is_complete()).count());
        let story_points_total: StoryPoints = tasks.iter().map(TaskRecord::story_points).sum();
        let story_points_completed: StoryPoints = tasks
            .iter()
            .filter(|task| task.is_complete())
            .map(TaskRecord::story_points)
            .sum();
        let duration_days = sprint.period().duration_days();

        let days_remaining = if sprint.state() == SprintState::Active {
            sprint.period().days_remaining_from(today)
        } else {
            0
        };

        Self {
            task_count,
            completed_task_count,
            progress: progress(completed_task_count, task_count),
            story_points_total,
            story_points_completed,
            duration_days,
            days_remaining,
            velocity: velocity(sprint.state(), story_points_completed, duration_days),
            backlog_task_count: saturating_count(backlog_task_count),
        }
    }
}

fn saturating_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[expect(
    clippy::float_arithmetic,
    reason = "progress is a percentage ratio of task counts"
)]
fn progress(completed: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(completed) / f64::from(total) * 100.0
}

/// Completed points per day for done sprints, rounded to two decimals.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "velocity is a points-per-day ratio"
)]
pub fn velocity(state: SprintState, completed: StoryPoints, duration_days: u32) -> f64 {
    if state != SprintState::Done || duration_days == 0 {
        return 0.0;
    }
    let per_day = f64::from(completed.value()) / f64::from(duration_days);
    (per_day * 100.0).round() / 100.0
}
