//! Task progression through the public service API.

use std::sync::Arc;

use super::helpers::{Game, game};
use chrono::TimeDelta;
use dojo::advisor::{ScriptedAdvisor, TaskAnalysis, UrgentCallSuggestion};
use dojo::store::GameStore;
use dojo::task::{
    domain::{TaskAssessment, TaskDomainError, TaskFrequency, TaskStatus},
    services::{CreateCustomTaskRequest, ExpirySweepService, TaskServiceError},
};
use dojo::user::domain::Attribute;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn custom_task_round_trip_pays_fee_energy_and_rewards(game: Game) {
    let hunter = game.sign_in(1, "jinwoo").await;

    let task = game
        .tasks
        .create_custom_task(
            CreateCustomTaskRequest::new(hunter.id(), "Push-ups x50", Attribute::Strength)
                .with_description("Before breakfast"),
        )
        .await
        .expect("task creation should succeed");
    game.tasks
        .start_task(task.id(), hunter.id())
        .await
        .expect("start should succeed");
    let completion = game
        .tasks
        .complete_task(task.id(), hunter.id())
        .await
        .expect("completion should succeed");

    assert_eq!(completion.task.status(), TaskStatus::Completed);
    assert!(!completion.leveled_up);
    let after = game.profile(&hunter).await;
    assert_eq!(after.gold(), 95);
    assert_eq!(after.energy(), 90);
    assert_eq!(after.xp(), 10);
    assert_eq!(after.attributes().get(Attribute::Strength), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn classified_task_uses_advisor_economics() {
    let advisor = ScriptedAdvisor::new().with_analysis(TaskAnalysis {
        assessment: TaskAssessment {
            attribute: Attribute::Intelligence,
            difficulty: 4,
            xp_reward: 45,
            gold_reward: 20,
            energy_cost: 25,
        },
        explanation: "Sustained study session".to_owned(),
    });
    let game = Game::with_advisor(advisor);
    let scholar = game.sign_in(2, "scholar").await;

    let task = game
        .tasks
        .create_custom_task(CreateCustomTaskRequest::new(
            scholar.id(),
            "Read two chapters",
            Attribute::Strength,
        ))
        .await
        .expect("task creation should succeed");
    game.tasks
        .start_task(task.id(), scholar.id())
        .await
        .expect("start should succeed");
    let completion = game
        .tasks
        .complete_task(task.id(), scholar.id())
        .await
        .expect("completion should succeed");

    assert!(task.ai_analyzed());
    assert_eq!(task.attribute(), Attribute::Intelligence);
    assert_eq!(game.advisor.calls(), 1);
    assert_eq!(completion.rewards.xp, 45);
    let after = game.profile(&scholar).await;
    assert_eq!(after.energy(), 75);
    assert_eq!(after.gold(), 110);
    assert_eq!(after.attributes().get(Attribute::Intelligence), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn daily_tasks_pay_in_full_without_a_license(game: Game) {
    let hunter = game.sign_in(3, "early-bird").await;
    game.clock.advance(TimeDelta::days(8));

    let daily = game
        .tasks
        .create_daily_task(hunter.id(), "Stretch", Attribute::Agility)
        .await
        .expect("daily creation should succeed");
    game.tasks
        .start_task(daily.id(), hunter.id())
        .await
        .expect("start should succeed");
    let completion = game
        .tasks
        .complete_task(daily.id(), hunter.id())
        .await
        .expect("completion should succeed");

    assert_eq!(daily.frequency(), TaskFrequency::Daily);
    assert_eq!(completion.rewards.xp, 15);
    assert_eq!(completion.rewards.gold, 5);
    let todays = game
        .tasks
        .daily_tasks_for_today(hunter.id())
        .await
        .expect("daily lookup should succeed");
    assert_eq!(todays.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ignored_urgent_call_expires_on_sweep() {
    let advisor = ScriptedAdvisor::new().with_urgent_call(UrgentCallSuggestion {
        title: "Sprint to the station".to_owned(),
        description: "The train leaves soon".to_owned(),
        attribute: Attribute::Agility,
        duration_minutes: 30,
    });
    let game = Game::with_advisor(advisor);
    let hunter = game.sign_in(4, "late").await;

    let urgent = game
        .tasks
        .issue_urgent_call(hunter.id())
        .await
        .expect("urgent call request should succeed")
        .expect("advisor should suggest a call");
    let listed = game
        .tasks
        .urgent_tasks(hunter.id())
        .await
        .expect("urgent lookup should succeed");
    assert_eq!(listed, vec![urgent.clone()]);

    game.clock.advance(TimeDelta::minutes(31));
    let late_start = game.tasks.start_task(urgent.id(), hunter.id()).await;
    assert!(matches!(
        late_start,
        Err(TaskServiceError::Task(TaskDomainError::TaskExpired(_)))
    ));

    let sweep = ExpirySweepService::new(
        Arc::new(game.store.tasks().clone()),
        Arc::clone(&game.clock),
    );
    assert_eq!(sweep.run().await.expect("sweep should succeed"), 1);
    let expired = game
        .tasks
        .find_by_id(urgent.id())
        .await
        .expect("task should exist");
    assert_eq!(expired.status(), TaskStatus::Expired);
    assert_eq!(game.profile(&hunter).await.energy(), 100);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_tasks_cannot_be_touched(game: Game) {
    let owner = game.sign_in(5, "owner").await;
    let intruder = game.sign_in(6, "intruder").await;
    let task = game
        .tasks
        .create_daily_task(owner.id(), "Meditate", Attribute::Insight)
        .await
        .expect("daily creation should succeed");

    let result = game.tasks.start_task(task.id(), intruder.id()).await;

    assert!(matches!(result, Err(TaskServiceError::Unauthorized { .. })));
    assert_eq!(game.profile(&intruder).await.energy(), 100);
}
