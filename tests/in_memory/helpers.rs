//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use dojo::advisor::ScriptedAdvisor;
use dojo::clock::ManualClock;
use dojo::store::InMemoryGameStore;
use dojo::task::services::TaskLifecycleService;
use dojo::user::{
    domain::{ExternalAccountId, User, UserProfile},
    services::{PlayerService, RegisterUserRequest},
};
use rstest::fixture;

/// Task service type used by the integration tests.
pub type TestTaskService = TaskLifecycleService<InMemoryGameStore, ScriptedAdvisor, ManualClock>;
/// Player service type used by the integration tests.
pub type TestPlayerService = PlayerService<InMemoryGameStore, ScriptedAdvisor, ManualClock>;

/// Both services wired to one store, advisor and clock.
pub struct Game {
    pub store: Arc<InMemoryGameStore>,
    pub clock: Arc<ManualClock>,
    pub advisor: ScriptedAdvisor,
    pub tasks: TestTaskService,
    pub players: TestPlayerService,
}

impl Game {
    /// Wires a game around `advisor`, starting on a fixed Monday morning.
    #[must_use]
    pub fn with_advisor(advisor: ScriptedAdvisor) -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 6, 1, 7, 30, 0)
            .single()
            .expect("valid start instant");
        let store = Arc::new(InMemoryGameStore::new());
        let clock = Arc::new(ManualClock::new(start));
        let shared = Arc::new(advisor.clone());
        Self {
            tasks: TaskLifecycleService::new(
                Arc::clone(&store),
                Arc::clone(&shared),
                Arc::clone(&clock),
            ),
            players: PlayerService::new(Arc::clone(&store), shared, Arc::clone(&clock)),
            store,
            clock,
            advisor,
        }
    }

    /// Signs a player in through the player service.
    pub async fn sign_in(&self, external_id: i64, username: &str) -> User {
        self.players
            .get_or_create_user(RegisterUserRequest::new(
                ExternalAccountId::new(external_id),
                UserProfile::new(username, username, ""),
            ))
            .await
            .expect("sign-in should succeed")
    }

    /// Reloads a player's profile.
    pub async fn profile(&self, user: &User) -> User {
        self.players
            .get_profile(user.id())
            .await
            .expect("profile should load")
    }
}

/// Provides a game whose advisor has no answers.
#[fixture]
pub fn game() -> Game {
    Game::with_advisor(ScriptedAdvisor::new())
}
