//! In-memory integration tests for project-level sprint views.

use super::helpers::{Board, board, day};
use rstest::rstest;
use sprintboard::sprint::{
    domain::{Sprint, StoryPoints, TaskStage},
    ports::TaskStore,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_sprints_are_listed_latest_first(board: Board) -> Result<(), eyre::Report> {
    let first = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    let third = board.sprint("Sprint 3", day(1, 29), day(2, 11)).await?;
    let second = board.sprint("Sprint 2", day(1, 15), day(1, 28)).await?;

    let listed = board.service.list_project_sprints(board.project_id).await?;

    let ids: Vec<_> = listed.iter().map(Sprint::id).collect();
    eyre::ensure!(ids == [third.id(), second.id(), first.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overview_reports_count_and_active_sprint(board: Board) -> Result<(), eyre::Report> {
    let first = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    board.sprint("Sprint 2", day(1, 15), day(1, 28)).await?;
    board.planned_task(&first, "Seed", 1, false).await?;
    board.service.start(first.id()).await?;

    let overview = board.service.project_overview(board.project_id).await?;

    eyre::ensure!(overview.sprint_count == 2);
    eyre::ensure!(overview.active_sprint == Some(first.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_project_has_no_active_sprint(board: Board) -> Result<(), eyre::Report> {
    let overview = board.service.project_overview(board.project_id).await?;

    eyre::ensure!(overview.sprint_count == 0);
    eyre::ensure!(overview.active_sprint.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn metrics_follow_stage_and_estimate_edits(board: Board) -> Result<(), eyre::Report> {
    let sprint = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    board.planned_task(&sprint, "Design", 3, true).await?;
    let build = board.planned_task(&sprint, "Build", 5, false).await?;
    let test = board.planned_task(&sprint, "Test", 2, false).await?;

    let before = board.service.metrics(sprint.id()).await?;
    eyre::ensure!(before.completed_task_count == 1);
    eyre::ensure!(before.story_points_total == StoryPoints::new(10));
    eyre::ensure!(before.story_points_completed == StoryPoints::new(3));

    let mut build = board
        .tasks
        .find_by_id(build.id())
        .await?
        .ok_or_else(|| eyre::eyre!("build task disappeared"))?;
    build.set_stage(TaskStage::folded("Done"));
    board.tasks.update(&build).await?;
    let mut test = board
        .tasks
        .find_by_id(test.id())
        .await?
        .ok_or_else(|| eyre::eyre!("test task disappeared"))?;
    test.set_story_points(StoryPoints::new(8));
    board.tasks.update(&test).await?;

    let after = board.service.metrics(sprint.id()).await?;
    eyre::ensure!(after.task_count == 3);
    eyre::ensure!(after.completed_task_count == 2);
    eyre::ensure!((after.progress - 200.0 / 3.0).abs() < 1e-9, "progress {}", after.progress);
    eyre::ensure!(after.story_points_total == StoryPoints::new(16));
    eyre::ensure!(after.story_points_completed == StoryPoints::new(8));
    Ok(())
}
