//! Shared world state for game behaviour scenarios.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use dojo::advisor::DisabledAdvisor;
use dojo::clock::ManualClock;
use dojo::store::{GameStore, InMemoryGameStore};
use dojo::task::{
    domain::Task,
    services::{TaskLifecycleService, TaskServiceError},
};
use dojo::user::{
    domain::{ExternalAccountId, User, UserProfile},
    ports::UserRepository,
    services::{PlayerService, PlayerServiceError, RaidOutcome, RegisterUserRequest},
};
use rstest::fixture;

/// Task service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryGameStore, DisabledAdvisor, ManualClock>;
/// Player service type used by the BDD world.
pub type TestPlayerService = PlayerService<InMemoryGameStore, DisabledAdvisor, ManualClock>;

/// Scenario world for game behaviour tests.
pub struct GameWorld {
    pub store: Arc<InMemoryGameStore>,
    pub clock: Arc<ManualClock>,
    pub tasks: TestTaskService,
    pub players: TestPlayerService,
    pub next_external_id: i64,
    pub player: Option<User>,
    pub target: Option<User>,
    pub task: Option<Task>,
    pub last_task_result: Option<Result<Task, TaskServiceError>>,
    pub last_raid_result: Option<Result<RaidOutcome, PlayerServiceError>>,
}

impl GameWorld {
    /// Creates a world with an empty store and a clock frozen at a fixed
    /// instant.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 7, 6, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        let store = Arc::new(InMemoryGameStore::new());
        let clock = Arc::new(ManualClock::new(start));
        let advisor = Arc::new(DisabledAdvisor);

        Self {
            tasks: TaskLifecycleService::new(
                Arc::clone(&store),
                Arc::clone(&advisor),
                Arc::clone(&clock),
            ),
            players: PlayerService::new(Arc::clone(&store), advisor, Arc::clone(&clock)),
            store,
            clock,
            next_external_id: 1,
            player: None,
            target: None,
            task: None,
            last_task_result: None,
            last_raid_result: None,
        }
    }

    /// Registers a player through the player service.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub fn register(&mut self, username: &str) -> Result<User, eyre::Report> {
        let external_id = ExternalAccountId::new(self.next_external_id);
        self.next_external_id += 1;
        let user = run_async(self.players.get_or_create_user(RegisterUserRequest::new(
            external_id,
            UserProfile::new(username, username, ""),
        )))?;
        Ok(user)
    }

    /// Returns the acting player.
    ///
    /// # Errors
    ///
    /// Returns an error if no player has been registered.
    pub fn player(&self) -> Result<&User, eyre::Report> {
        self.player
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing player in scenario world"))
    }

    /// Returns the raid target.
    ///
    /// # Errors
    ///
    /// Returns an error if no target has been registered.
    pub fn target(&self) -> Result<&User, eyre::Report> {
        self.target
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing target in scenario world"))
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Loads the stored state of `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or the user is gone.
    pub fn stored(&self, user: &User) -> Result<User, eyre::Report> {
        run_async(self.store.users().find_by_id(user.id()))?
            .ok_or_else(|| eyre::eyre!("user {} missing from store", user.id()))
    }

    /// Writes `user` back to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn save(&self, user: &User) -> Result<(), eyre::Report> {
        run_async(self.store.users().update(user))?;
        Ok(())
    }
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> GameWorld {
    GameWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
