//! Player economy across services: raids, advisory chat and rankings.

use super::helpers::{Game, game};
use chrono::TimeDelta;
use dojo::advisor::{ChatMessage, ScriptedAdvisor};
use dojo::user::{
    domain::{Attribute, UserDomainError},
    ports::Page,
    services::{PlayerServiceError, RaidRequest},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dormant_player_is_raided_by_an_active_one(game: Game) {
    let sleeper = game.sign_in(10, "sleeper").await;
    game.clock.advance(TimeDelta::days(4));
    let raider = game.sign_in(11, "raider").await;

    let targets = game
        .players
        .raid_targets(5)
        .await
        .expect("target lookup should succeed");
    assert_eq!(targets.len(), 1);

    let outcome = game
        .players
        .raid_inactive_player(RaidRequest {
            attacker_id: raider.id(),
            target_id: sleeper.id(),
            cost: 15,
        })
        .await
        .expect("raid should succeed");

    assert_eq!(outcome.gold_looted, 20);
    assert_eq!(outcome.target_name, "sleeper");
    assert_eq!(game.profile(&raider).await.gold(), 105);

    let retaliation = game
        .players
        .raid_inactive_player(RaidRequest {
            attacker_id: sleeper.id(),
            target_id: raider.id(),
            cost: 15,
        })
        .await;
    assert!(matches!(
        retaliation,
        Err(PlayerServiceError::User(UserDomainError::PlayerNotInactive))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn advisory_chat_draws_on_the_weekly_quota() {
    let game = Game::with_advisor(ScriptedAdvisor::new().with_reply("Hydrate."));
    let hunter = game.sign_in(12, "curious").await;
    let history = vec![
        ChatMessage::user("How do I level faster?"),
        ChatMessage::assistant("Finish your dailies."),
    ];

    let reply = game
        .players
        .chat_with_advisor(hunter.id(), "Anything else?", &history)
        .await
        .expect("chat should succeed");

    assert_eq!(reply, "Hydrate.");
    assert_eq!(game.profile(&hunter).await.advisory().remaining, 4);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chat_without_an_advisor_keeps_the_request(game: Game) {
    let hunter = game.sign_in(13, "offline").await;

    let result = game
        .players
        .chat_with_advisor(hunter.id(), "Hello?", &[])
        .await;

    assert!(matches!(result, Err(PlayerServiceError::Advisor(_))));
    assert_eq!(game.profile(&hunter).await.advisory().remaining, 5);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_work_climbs_the_leaderboard(game: Game) {
    let idle = game.sign_in(14, "idle").await;
    let worker = game.sign_in(15, "worker").await;

    for title in ["Run 5k", "Swim laps", "Climb stairs", "Row 2k", "Cycle 10k"] {
        let task = game
            .tasks
            .create_daily_task(worker.id(), title, Attribute::Agility)
            .await
            .expect("daily creation should succeed");
        game.tasks
            .start_task(task.id(), worker.id())
            .await
            .expect("start should succeed");
        game.tasks
            .complete_task(task.id(), worker.id())
            .await
            .expect("completion should succeed");
    }

    let board = game
        .players
        .leaderboard(Page::default())
        .await
        .expect("leaderboard should load");
    let ids: Vec<_> = board.iter().map(|user| user.id()).collect();
    assert_eq!(ids, vec![worker.id(), idle.id()]);
    let champion = game.profile(&worker).await;
    assert_eq!(champion.level(), 2);
    assert_eq!(champion.attributes().get(Attribute::Agility), 6);
    assert_eq!(champion.energy(), 100);
}
