//! When steps for game behaviour scenarios.

use super::world::{GameWorld, run_async};
use dojo::user::services::RaidRequest;
use rstest_bdd_macros::when;

#[when("the player starts the task")]
fn start_task(world: &mut GameWorld) -> Result<(), eyre::Report> {
    let result = run_async(
        world
            .tasks
            .start_task(world.task()?.id(), world.player()?.id()),
    );
    if let Ok(ref started) = result {
        world.task = Some(started.clone());
    }
    world.last_task_result = Some(result);
    Ok(())
}

#[when("the player completes the task")]
fn complete_task(world: &mut GameWorld) -> Result<(), eyre::Report> {
    let result = run_async(
        world
            .tasks
            .complete_task(world.task()?.id(), world.player()?.id()),
    )
    .map(|completion| completion.task);
    if let Ok(ref completed) = result {
        world.task = Some(completed.clone());
    }
    world.last_task_result = Some(result);
    Ok(())
}

#[when("the player declines the task")]
fn decline_task(world: &mut GameWorld) -> Result<(), eyre::Report> {
    let result = run_async(
        world
            .tasks
            .decline_urgent_call(world.task()?.id(), world.player()?.id()),
    );
    if let Ok(ref declined) = result {
        world.task = Some(declined.clone());
    }
    world.last_task_result = Some(result);
    Ok(())
}

#[when("the player raids the target paying {cost:u64} gold")]
fn raid_target(world: &mut GameWorld, cost: u64) -> Result<(), eyre::Report> {
    let request = RaidRequest {
        attacker_id: world.player()?.id(),
        target_id: world.target()?.id(),
        cost,
    };
    world.last_raid_result = Some(run_async(world.players.raid_inactive_player(request)));
    Ok(())
}
