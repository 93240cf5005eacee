//! In-memory integration tests for planning backlog tasks into sprints.

use super::helpers::{Board, board, day};
use rstest::rstest;
use sprintboard::sprint::{
    domain::{ProjectId, SprintDomainError, SprintState},
    ports::TaskStore,
    services::SprintServiceError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn backlog_candidates_exclude_planned_tasks(board: Board) -> Result<(), eyre::Report> {
    let sprint = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    let other = board.sprint("Sprint 2", day(1, 15), day(1, 28)).await?;
    board.planned_task(&other, "Already planned", 3, false).await?;
    let free = board.backlog_task("Free", 2).await?;

    let assignment = board.service.open_backlog_assignment(sprint.id()).await?;

    eyre::ensure!(assignment.candidates() == [free.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirmed_selection_is_planned_into_sprint(board: Board) -> Result<(), eyre::Report> {
    let sprint = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    let first = board.backlog_task("First", 2).await?;
    let second = board.backlog_task("Second", 3).await?;
    let skipped = board.backlog_task("Skipped", 5).await?;
    let mut assignment = board.service.open_backlog_assignment(sprint.id()).await?;
    assignment.select(first.id())?;
    assignment.select(second.id())?;

    let planned = board.service.confirm_backlog_assignment(assignment).await?;

    eyre::ensure!(planned.len() == 2);
    let sprint_tasks = board.service.sprint_tasks(sprint.id()).await?;
    eyre::ensure!(sprint_tasks.len() == 2);
    eyre::ensure!(
        sprint_tasks
            .iter()
            .all(|task| task.sprint_state() == Some(SprintState::Draft))
    );
    let untouched = board.tasks.find_by_id(skipped.id()).await?;
    eyre::ensure!(untouched.is_some_and(|task| task.is_backlog()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_moved_away_after_selection_is_rejected(board: Board) -> Result<(), eyre::Report> {
    let sprint = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    let stays = board.backlog_task("Stays", 2).await?;
    let leaves = board.backlog_task("Leaves", 3).await?;
    let mut assignment = board.service.open_backlog_assignment(sprint.id()).await?;
    assignment.select_all();
    board
        .service
        .move_task_to_project(leaves.id(), ProjectId::new())
        .await?;

    let result = board.service.confirm_backlog_assignment(assignment).await;

    eyre::ensure!(matches!(
        result,
        Err(SprintServiceError::Domain(SprintDomainError::ProjectMismatch { .. }))
    ));
    let stored = board.tasks.find_by_id(stays.id()).await?;
    eyre::ensure!(stored.is_some_and(|task| task.is_backlog()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigning_task_from_another_project_is_rejected(
    board: Board,
) -> Result<(), eyre::Report> {
    let sprint = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    let task = board.backlog_task("Elsewhere", 1).await?;
    board
        .service
        .move_task_to_project(task.id(), ProjectId::new())
        .await?;

    let result = board.service.assign_task(task.id(), sprint.id()).await;

    let Err(err) = result else {
        eyre::bail!("expected cross-project assignment to fail");
    };
    eyre::ensure!(
        err.to_string().contains("from a different project"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn planned_task_cannot_change_project(board: Board) -> Result<(), eyre::Report> {
    let sprint = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    let task = board.planned_task(&sprint, "Pinned", 2, false).await?;

    let result = board
        .service
        .move_task_to_project(task.id(), ProjectId::new())
        .await;

    eyre::ensure!(matches!(
        result,
        Err(SprintServiceError::Domain(SprintDomainError::ProjectMismatch { .. }))
    ));

    board.service.unassign_task(task.id()).await?;
    let moved = board
        .service
        .move_task_to_project(task.id(), ProjectId::new())
        .await?;
    eyre::ensure!(moved.project_id() != board.project_id);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_sprint_accepts_direct_assignment(board: Board) -> Result<(), eyre::Report> {
    let sprint = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    board.planned_task(&sprint, "Seed", 1, false).await?;
    board.service.start(sprint.id()).await?;
    let late = board.backlog_task("Late", 2).await?;

    let assigned = board.service.assign_task(late.id(), sprint.id()).await?;

    eyre::ensure!(assigned.sprint_state() == Some(SprintState::Active));
    Ok(())
}
