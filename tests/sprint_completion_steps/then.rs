//! Then steps for sprint completion BDD scenarios.

use super::world::{CompletionWorld, run_async};
use rstest_bdd_macros::then;
use sprintboard::sprint::{
    domain::{SprintDomainError, SprintState},
    ports::TaskStore,
    services::SprintServiceError,
};

#[then("completion waits for a disposition covering {count:usize} tasks")]
fn completion_waits_for_disposition(
    world: &CompletionWorld,
    count: usize,
) -> Result<(), eyre::Report> {
    let workflow = world
        .workflow
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected a pending completion workflow"))?;
    eyre::ensure!(
        workflow.incomplete_task_count() == count,
        "expected {count} unfinished tasks, found {}",
        workflow.incomplete_task_count()
    );
    Ok(())
}

#[then(r#"the sprint state is "{state}""#)]
fn sprint_state_is(world: &CompletionWorld, state: String) -> Result<(), eyre::Report> {
    let expected = SprintState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))?;
    let sprint_id = world.sprint()?.id();

    let stored = run_async(world.service.find_sprint(sprint_id))?
        .ok_or_else(|| eyre::eyre!("sprint {sprint_id} disappeared"))?;

    if stored.state() != expected {
        return Err(eyre::eyre!(
            "expected state {}, found {}",
            expected.as_str(),
            stored.state().as_str()
        ));
    }
    Ok(())
}

#[then("the project backlog holds {count:usize} tasks")]
fn project_backlog_holds(world: &CompletionWorld, count: usize) -> Result<(), eyre::Report> {
    let backlog = run_async(world.tasks.count_backlog(world.project_id))?;
    eyre::ensure!(backlog == count, "expected {count} backlog tasks, found {backlog}");
    Ok(())
}

#[then("the next sprint holds {count:usize} tasks")]
fn next_sprint_holds(world: &CompletionWorld, count: usize) -> Result<(), eyre::Report> {
    let next = world
        .next_sprint
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing next sprint in scenario world"))?;
    let tasks = run_async(world.service.sprint_tasks(next.id()))?;
    eyre::ensure!(
        tasks.len() == count,
        "expected {count} tasks in {}, found {}",
        next.name(),
        tasks.len()
    );
    Ok(())
}

#[then(r#"the sprint history ends with "{note}""#)]
fn sprint_history_ends_with(world: &CompletionWorld, note: String) -> Result<(), eyre::Report> {
    let notes = world.audit.notes_for(world.sprint()?.id())?;
    let last = notes
        .last()
        .ok_or_else(|| eyre::eyre!("sprint history is empty"))?;
    eyre::ensure!(last.body == note, "expected note {note:?}, found {:?}", last.body);
    Ok(())
}

#[then("the completion fails with a missing target error")]
fn completion_fails_with_missing_target(world: &CompletionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_confirmation
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing confirmation result"))?;

    if !matches!(
        result,
        Err(SprintServiceError::Domain(SprintDomainError::MissingTargetSprint))
    ) {
        return Err(eyre::eyre!(
            "expected MissingTargetSprint error, got {result:?}"
        ));
    }
    Ok(())
}
