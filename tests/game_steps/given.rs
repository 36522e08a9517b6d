//! Given steps for game behaviour scenarios.

use super::world::{GameWorld, run_async};
use chrono::TimeDelta;
use dojo::task::services::{CreateCustomTaskRequest, CreateUrgentCallRequest};
use dojo::user::domain::{Attribute, User};
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn parse_attribute(name: &str) -> Result<Attribute, eyre::Report> {
    Attribute::try_from(name).map_err(|err| eyre::eyre!("invalid attribute in scenario: {err}"))
}

fn set_gold(user: &mut User, gold: u64) -> Result<(), eyre::Report> {
    let current = user.gold();
    if gold >= current {
        user.add_gold(i64::try_from(gold - current)?);
    } else {
        user.spend_gold(current - gold)?;
    }
    Ok(())
}

#[given(r#"a registered player "{username}""#)]
fn registered_player(world: &mut GameWorld, username: String) -> Result<(), eyre::Report> {
    let player = world.register(&username)?;
    world.player = Some(player);
    Ok(())
}

#[given("the player has {energy:u32} energy left")]
fn player_has_energy_left(world: &mut GameWorld, energy: u32) -> Result<(), eyre::Report> {
    let mut player = world.stored(world.player()?)?;
    player.spend_energy(player.energy().saturating_sub(energy))?;
    world.save(&player)?;
    world.player = Some(player);
    Ok(())
}

#[given(r#"the player has created a custom "{attribute}" task "{title}""#)]
fn created_custom_task(
    world: &mut GameWorld,
    attribute: String,
    title: String,
) -> Result<(), eyre::Report> {
    let request =
        CreateCustomTaskRequest::new(world.player()?.id(), title, parse_attribute(&attribute)?);
    let task = run_async(world.tasks.create_custom_task(request))
        .wrap_err("create custom task for scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"the player has created a daily "{attribute}" task "{title}""#)]
fn created_daily_task(
    world: &mut GameWorld,
    attribute: String,
    title: String,
) -> Result<(), eyre::Report> {
    let task = run_async(world.tasks.create_daily_task(
        world.player()?.id(),
        &title,
        parse_attribute(&attribute)?,
    ))
    .wrap_err("create daily task for scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"the player has an urgent "{attribute}" call "{title}" lasting {minutes:i64} minutes"#)]
fn urgent_call(
    world: &mut GameWorld,
    attribute: String,
    title: String,
    minutes: i64,
) -> Result<(), eyre::Report> {
    let request = CreateUrgentCallRequest::new(
        world.player()?.id(),
        title,
        parse_attribute(&attribute)?,
        TimeDelta::minutes(minutes),
    );
    let task = run_async(world.tasks.create_urgent_call(request))
        .wrap_err("create urgent call for scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given("the player has started the task")]
fn started_task(world: &mut GameWorld) -> Result<(), eyre::Report> {
    let task = run_async(
        world
            .tasks
            .start_task(world.task()?.id(), world.player()?.id()),
    )
    .wrap_err("start task in scenario setup")?;
    world.task = Some(task);
    Ok(())
}

#[given("{days:i64} days pass")]
fn days_pass(world: &mut GameWorld, days: i64) {
    world.clock.advance(TimeDelta::days(days));
}

#[given("{minutes:i64} minutes pass")]
fn minutes_pass(world: &mut GameWorld, minutes: i64) {
    world.clock.advance(TimeDelta::minutes(minutes));
}

#[given(r#"an inactive player "{username}" holding {gold:u64} gold"#)]
fn inactive_player(world: &mut GameWorld, username: String, gold: u64) -> Result<(), eyre::Report> {
    let mut target = world.register(&username)?;
    set_gold(&mut target, gold)?;
    world.save(&target)?;
    world
        .clock
        .advance(TimeDelta::days(3) + TimeDelta::seconds(1));
    world.target = Some(target);
    Ok(())
}

#[given(r#"an active player "{username}" holding {gold:u64} gold"#)]
fn active_player(world: &mut GameWorld, username: String, gold: u64) -> Result<(), eyre::Report> {
    let mut target = world.register(&username)?;
    set_gold(&mut target, gold)?;
    world.save(&target)?;
    world.target = Some(target);
    Ok(())
}

#[given("the player's license has been revoked")]
fn license_revoked(world: &mut GameWorld) -> Result<(), eyre::Report> {
    let mut player = world.stored(world.player()?)?;
    player.revoke_license();
    world.save(&player)?;
    world.player = Some(player);
    Ok(())
}
