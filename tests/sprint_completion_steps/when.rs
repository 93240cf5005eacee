//! When steps for sprint completion BDD scenarios.

use super::world::{CompletionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use sprintboard::sprint::domain::{
    CompletionOutcome, CompletionWorkflow, IncompleteTaskDisposition,
};

#[when("the sprint is completed")]
fn sprint_is_completed(world: &mut CompletionWorld) -> Result<(), eyre::Report> {
    let sprint_id = world.sprint()?.id();
    let outcome =
        run_async(world.service.complete(sprint_id)).wrap_err("request sprint completion")?;
    match outcome {
        CompletionOutcome::Completed(done) => world.sprint = Some(done),
        CompletionOutcome::PendingDisposition(workflow) => world.workflow = Some(workflow),
    }
    Ok(())
}

#[when("the unfinished tasks are sent to the backlog")]
fn tasks_sent_to_backlog(world: &mut CompletionWorld) -> Result<(), eyre::Report> {
    confirm_with(world, |workflow| {
        workflow.choose(IncompleteTaskDisposition::MoveToBacklog);
        Ok(())
    })
}

#[when("the unfinished tasks are moved to the next sprint")]
fn tasks_moved_to_next_sprint(world: &mut CompletionWorld) -> Result<(), eyre::Report> {
    let next = world
        .next_sprint
        .clone()
        .ok_or_else(|| eyre::eyre!("missing next sprint in scenario world"))?;
    confirm_with(world, |workflow| Ok(workflow.move_to(&next)?))
}

#[when("the move disposition is confirmed without a target")]
fn move_confirmed_without_target(world: &mut CompletionWorld) -> Result<(), eyre::Report> {
    confirm_with(world, |workflow| {
        workflow.choose(IncompleteTaskDisposition::MoveToSprint);
        Ok(())
    })
}

fn confirm_with(
    world: &mut CompletionWorld,
    decide: impl FnOnce(&mut CompletionWorkflow) -> Result<(), eyre::Report>,
) -> Result<(), eyre::Report> {
    let mut workflow = world
        .workflow
        .take()
        .ok_or_else(|| eyre::eyre!("missing completion workflow in scenario world"))?;
    decide(&mut workflow)?;

    let result = run_async(world.service.confirm_completion(workflow));
    if let Ok(ref done) = result {
        world.sprint = Some(done.clone());
    }
    world.last_confirmation = Some(result);
    Ok(())
}
