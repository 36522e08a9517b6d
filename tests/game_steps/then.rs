//! Then steps for game behaviour scenarios.

use super::world::{GameWorld, run_async};
use dojo::user::domain::Attribute;
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &GameWorld, status: String) -> Result<(), eyre::Report> {
    let stored = run_async(world.tasks.find_by_id(world.task()?.id()))?;
    eyre::ensure!(
        stored.status().as_str() == status,
        "expected status {status}, found {}",
        stored.status()
    );
    Ok(())
}

#[then(r#"the task action fails with "{kind}""#)]
fn task_action_fails(world: &GameWorld, kind: String) -> Result<(), eyre::Report> {
    let result = world
        .last_task_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task action result"))?;
    let Err(err) = result else {
        return Err(eyre::eyre!("expected {kind} error, got {result:?}"));
    };
    eyre::ensure!(
        err.kind().map(|found| found.as_str()) == Some(kind.as_str()),
        "expected {kind} error, got {err:?}"
    );
    Ok(())
}

#[then("the player has {gold:u64} gold")]
fn player_gold(world: &GameWorld, gold: u64) -> Result<(), eyre::Report> {
    let player = world.stored(world.player()?)?;
    eyre::ensure!(player.gold() == gold, "expected {gold} gold, found {}", player.gold());
    Ok(())
}

#[then("the player has {energy:u32} energy")]
fn player_energy(world: &GameWorld, energy: u32) -> Result<(), eyre::Report> {
    let player = world.stored(world.player()?)?;
    eyre::ensure!(
        player.energy() == energy,
        "expected {energy} energy, found {}",
        player.energy()
    );
    Ok(())
}

#[then("the player has {xp:u64} experience")]
fn player_experience(world: &GameWorld, xp: u64) -> Result<(), eyre::Report> {
    let player = world.stored(world.player()?)?;
    eyre::ensure!(player.xp() == xp, "expected {xp} experience, found {}", player.xp());
    Ok(())
}

#[then(r#"the player's "{attribute}" attribute is {value:u32}"#)]
fn player_attribute(world: &GameWorld, attribute: String, value: u32) -> Result<(), eyre::Report> {
    let parsed = Attribute::try_from(attribute.as_str())
        .map_err(|err| eyre::eyre!("invalid attribute in scenario: {err}"))?;
    let player = world.stored(world.player()?)?;
    let found = player.attributes().get(parsed);
    eyre::ensure!(found == value, "expected {attribute} {value}, found {found}");
    Ok(())
}

#[then("the raid loots {gold:u64} gold")]
fn raid_loots(world: &GameWorld, gold: u64) -> Result<(), eyre::Report> {
    let result = world
        .last_raid_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing raid result"))?;
    let Ok(outcome) = result else {
        return Err(eyre::eyre!("expected a successful raid, got {result:?}"));
    };
    eyre::ensure!(
        outcome.gold_looted == gold,
        "expected {gold} loot, found {}",
        outcome.gold_looted
    );
    Ok(())
}

#[then(r#"the raid fails with "{kind}""#)]
fn raid_fails(world: &GameWorld, kind: String) -> Result<(), eyre::Report> {
    let result = world
        .last_raid_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing raid result"))?;
    let Err(err) = result else {
        return Err(eyre::eyre!("expected {kind} error, got {result:?}"));
    };
    eyre::ensure!(
        err.kind().map(|found| found.as_str()) == Some(kind.as_str()),
        "expected {kind} error, got {err:?}"
    );
    Ok(())
}

#[then("the target has {gold:u64} gold")]
fn target_gold(world: &GameWorld, gold: u64) -> Result<(), eyre::Report> {
    let target = world.stored(world.target()?)?;
    eyre::ensure!(target.gold() == gold, "expected {gold} gold, found {}", target.gold());
    Ok(())
}
