//! In-memory integration tests for sprint creation and lifecycle transitions.

use super::helpers::{Board, board, day};
use rstest::rstest;
use sprintboard::sprint::{
    domain::{SprintDomainError, SprintErrorCategory, SprintState},
    ports::{SprintRepositoryError, TaskStore},
    services::{CreateSprintRequest, SprintServiceError, UpdateSprintRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprint_lifecycle_runs_from_draft_to_done(board: Board) -> Result<(), eyre::Report> {
    let sprint = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    let task = board.planned_task(&sprint, "Ship it", 7, true).await?;

    let started = board.service.start(sprint.id()).await?;
    eyre::ensure!(started.state() == SprintState::Active);

    board.service.complete(sprint.id()).await?;
    let finished = board
        .service
        .find_sprint(sprint.id())
        .await?
        .ok_or_else(|| eyre::eyre!("sprint disappeared"))?;
    eyre::ensure!(finished.state() == SprintState::Done);

    let mirrored = board
        .tasks
        .find_by_id(task.id())
        .await?
        .and_then(|found| found.sprint_state());
    eyre::ensure!(mirrored == Some(SprintState::Done));

    let notes: Vec<String> = board
        .audit
        .notes_for(sprint.id())?
        .into_iter()
        .map(|note| note.body)
        .collect();
    eyre::ensure!(
        notes
            == [
                "Sprint started".to_owned(),
                "Sprint completed with velocity: 0.50 points/day".to_owned()
            ],
        "unexpected notes: {notes:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn starting_empty_sprint_is_a_usage_error(board: Board) -> Result<(), eyre::Report> {
    let sprint = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;

    let result = board.service.start(sprint.id()).await;

    let Err(err) = result else {
        eyre::bail!("expected start without tasks to fail");
    };
    let category = err.as_domain().map(SprintDomainError::category);
    eyre::ensure!(category == Some(SprintErrorCategory::Usage));
    eyre::ensure!(err.to_string().contains("add tasks first"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overlapping_update_is_rejected(board: Board) -> Result<(), eyre::Report> {
    board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    let second = board.sprint("Sprint 2", day(1, 15), day(1, 28)).await?;

    let result = board
        .service
        .update_sprint(UpdateSprintRequest::new(second.id()).with_dates(day(1, 14), day(1, 27)))
        .await;

    eyre::ensure!(matches!(
        result,
        Err(SprintServiceError::Domain(SprintDomainError::SprintOverlap { .. }))
    ));
    let stored = board
        .service
        .find_sprint(second.id())
        .await?
        .ok_or_else(|| eyre::eyre!("sprint disappeared"))?;
    eyre::ensure!(stored.period().start() == day(1, 15));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_sprint_frees_its_dates(board: Board) -> Result<(), eyre::Report> {
    let first = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    board.service.cancel(first.id()).await?;

    let replacement = board.sprint("Sprint 1 again", day(1, 1), day(1, 14)).await?;

    eyre::ensure!(replacement.state() == SprintState::Draft);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_name_in_project_is_rejected(board: Board) -> Result<(), eyre::Report> {
    board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;

    let result = board
        .service
        .create_sprint(CreateSprintRequest::new(board.project_id, "Sprint 1", day(2, 1)))
        .await;

    eyre::ensure!(matches!(
        result,
        Err(SprintServiceError::Repository(SprintRepositoryError::DuplicateName { .. }))
    ));
    Ok(())
}

#[rstest]
#[case(day(1, 1), day(1, 31), "exceeds the 30-day limit")]
#[case(day(1, 10), day(1, 9), "cannot be earlier than start date")]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_date_ranges_are_rejected(
    board: Board,
    #[case] start: chrono::NaiveDate,
    #[case] end: chrono::NaiveDate,
    #[case] message: &str,
) -> Result<(), eyre::Report> {
    let result = board.sprint("Sprint 1", start, end).await;

    let Err(err) = result else {
        eyre::bail!("expected {start}..{end} to be rejected");
    };
    eyre::ensure!(err.to_string().contains(message), "unexpected error: {err}");
    eyre::ensure!(
        board
            .service
            .list_project_sprints(board.project_id)
            .await?
            .is_empty()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reset_to_draft_mirrors_onto_tasks(board: Board) -> Result<(), eyre::Report> {
    let sprint = board.sprint("Sprint 1", day(1, 1), day(1, 14)).await?;
    let task = board.planned_task(&sprint, "Ship it", 3, false).await?;
    board.service.start(sprint.id()).await?;

    let reset = board.service.reset_to_draft(sprint.id()).await?;

    eyre::ensure!(reset.state() == SprintState::Draft);
    let mirrored = board
        .tasks
        .find_by_id(task.id())
        .await?
        .and_then(|found| found.sprint_state());
    eyre::ensure!(mirrored == Some(SprintState::Draft));
    eyre::ensure!(board.audit.notes_for(sprint.id())?.len() == 1);
    Ok(())
}
