//! Service layer for task creation, progression and urgent calls.

use crate::advisor::Advisor;
use crate::error::DomainErrorKind;
use crate::store::{Changeset, GameStore, StoreError};
use crate::task::{
    domain::{RewardScale, Task, TaskDomainError, TaskFrequency, TaskId, TaskRewards},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{Attribute, User, UserDomainError, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a player-defined task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCustomTaskRequest {
    user_id: UserId,
    title: String,
    description: String,
    attribute: Attribute,
}

impl CreateCustomTaskRequest {
    /// Creates a request with an empty description.
    #[must_use]
    pub fn new(user_id: UserId, title: impl Into<String>, attribute: Attribute) -> Self {
        Self {
            user_id,
            title: title.into(),
            description: String::new(),
            attribute,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request payload for creating an urgent call directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUrgentCallRequest {
    user_id: UserId,
    title: String,
    description: String,
    attribute: Attribute,
    duration: TimeDelta,
}

impl CreateUrgentCallRequest {
    /// Creates a request for an urgent call that must be started within
    /// `duration`.
    #[must_use]
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        attribute: Attribute,
        duration: TimeDelta,
    ) -> Self {
        Self {
            user_id,
            title: title.into(),
            description: String::new(),
            attribute,
            duration,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Outcome of completing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCompletion {
    /// The completed task.
    pub task: Task,
    /// Rewards actually granted.
    pub rewards: TaskRewards,
    /// Whether the player gained a level.
    pub leveled_up: bool,
    /// Player level after the grant.
    pub new_level: u32,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// A task rule was violated.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
    /// A player rule was violated.
    #[error(transparent)]
    User(#[from] UserDomainError),
    /// The caller does not own the task.
    #[error("user {user_id} does not own task {task_id}")]
    Unauthorized {
        /// Task identifier.
        task_id: TaskId,
        /// Calling user.
        user_id: UserId,
    },
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// Task lookup failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),
    /// The atomic write failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TaskServiceError {
    /// Classifies the error; `None` for infrastructure failures.
    #[must_use]
    pub const fn kind(&self) -> Option<DomainErrorKind> {
        match self {
            Self::Task(err) => Some(err.kind()),
            Self::User(err) => Some(err.kind()),
            Self::Unauthorized { .. } => Some(DomainErrorKind::Unauthorized),
            Self::TaskNotFound(_) | Self::UserNotFound(_) => Some(DomainErrorKind::NotFound),
            Self::TaskRepository(err) => err.kind(),
            Self::UserRepository(err) => err.kind(),
            Self::Store(err) => err.kind(),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<S, A, C>
where
    S: GameStore,
    A: Advisor,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    advisor: Arc<A>,
    clock: Arc<C>,
}

impl<S, A, C> TaskLifecycleService<S, A, C>
where
    S: GameStore,
    A: Advisor,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, advisor: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            store,
            advisor,
            clock,
        }
    }

    /// Creates a custom task, charging its creation fee.
    ///
    /// The fee is debited before the advisor is consulted. When the advisor
    /// cannot classify the task the base rewards for its difficulty apply.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::User`] with
    /// [`UserDomainError::InsufficientGold`] when the fee cannot be paid; in
    /// that case nothing is persisted.
    pub async fn create_custom_task(
        &self,
        request: CreateCustomTaskRequest,
    ) -> TaskServiceResult<Task> {
        let mut user = self.load_user(request.user_id).await?;
        let mut task = Task::new_custom(
            user.id(),
            request.title,
            request.description,
            request.attribute,
            &*self.clock,
        )?;
        user.spend_gold(task.gold_cost())?;

        match self
            .advisor
            .analyze_task(task.title(), task.description())
            .await
        {
            Ok(analysis) => task.apply_assessment(analysis.assessment)?,
            Err(err) => {
                debug!(task_id = %task.id(), error = %err, "task classification unavailable, using base rewards");
                task.calculate_rewards()?;
            }
        }

        self.store
            .commit(Changeset::new().with_new_task(task.clone()).with_user(user))
            .await?;
        info!(task_id = %task.id(), user_id = %task.owner(), "custom task created");
        Ok(task)
    }

    /// Creates a daily task for a player.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::UserNotFound`] for unknown players or
    /// [`TaskServiceError::Task`] for a blank title.
    pub async fn create_daily_task(
        &self,
        user_id: UserId,
        title: &str,
        attribute: Attribute,
    ) -> TaskServiceResult<Task> {
        let user = self.load_user(user_id).await?;
        let task = Task::new_daily(user.id(), title, attribute, &*self.clock)?;
        self.store
            .commit(Changeset::new().with_new_task(task.clone()))
            .await?;
        Ok(task)
    }

    /// Creates an urgent call with an explicit window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::UserNotFound`] for unknown players or
    /// [`TaskServiceError::Task`] for a blank title or non-positive window.
    pub async fn create_urgent_call(
        &self,
        request: CreateUrgentCallRequest,
    ) -> TaskServiceResult<Task> {
        let user = self.load_user(request.user_id).await?;
        let task = Task::new_urgent_call(
            user.id(),
            request.title,
            request.description,
            request.attribute,
            request.duration,
            &*self.clock,
        )?;
        self.store
            .commit(Changeset::new().with_new_task(task.clone()))
            .await?;
        info!(task_id = %task.id(), user_id = %user.id(), "urgent call issued");
        Ok(task)
    }

    /// Asks the advisor for an urgent call and creates it.
    ///
    /// Returns `Ok(None)` when the advisor has no usable suggestion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::UserNotFound`] for unknown players or a
    /// storage error when the task cannot be written.
    pub async fn issue_urgent_call(&self, user_id: UserId) -> TaskServiceResult<Option<Task>> {
        let user = self.load_user(user_id).await?;
        let suggestion = match self.advisor.generate_urgent_call(user.id()).await {
            Ok(suggestion) => suggestion,
            Err(err) => {
                debug!(user_id = %user.id(), error = %err, "no urgent call suggested");
                return Ok(None);
            }
        };
        let duration = suggestion.duration();
        let task = match Task::new_urgent_call(
            user.id(),
            suggestion.title,
            suggestion.description,
            suggestion.attribute,
            duration,
            &*self.clock,
        ) {
            Ok(task) => task,
            Err(err) => {
                debug!(user_id = %user.id(), error = %err, "urgent call suggestion rejected");
                return Ok(None);
            }
        };
        self.store
            .commit(Changeset::new().with_new_task(task.clone()))
            .await?;
        info!(task_id = %task.id(), user_id = %user.id(), "urgent call issued");
        Ok(Some(task))
    }

    /// Starts a task, paying its energy cost.
    ///
    /// The energy debit and the status change are committed together.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when the caller does not
    /// own the task, [`UserDomainError::InsufficientEnergy`], or the task's
    /// [`TaskDomainError::TaskNotActive`] / [`TaskDomainError::TaskExpired`].
    pub async fn start_task(&self, task_id: TaskId, user_id: UserId) -> TaskServiceResult<Task> {
        let mut task = self.load_owned_task(task_id, user_id).await?;
        let mut user = self.load_user(user_id).await?;

        user.spend_energy(task.energy_cost())?;
        task.start(&*self.clock)?;

        self.store
            .commit(Changeset::new().with_task(task.clone()).with_user(user))
            .await?;
        debug!(task_id = %task.id(), "task started");
        Ok(task)
    }

    /// Completes a started task and grants its rewards.
    ///
    /// Non-daily tasks pay half experience and gold while the player's
    /// license is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when the caller does not
    /// own the task or [`TaskDomainError::TaskNotInProgress`] when it was
    /// never started.
    pub async fn complete_task(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> TaskServiceResult<TaskCompletion> {
        let mut task = self.load_owned_task(task_id, user_id).await?;
        let mut user = self.load_user(user_id).await?;

        let scale = if task.frequency() != TaskFrequency::Daily
            && !user.is_license_valid(&*self.clock)
        {
            RewardScale::Halved
        } else {
            RewardScale::Full
        };
        let rewards = task.complete(scale, &*self.clock)?;

        let leveled_up = user.add_xp(rewards.xp);
        user.add_gold(0_i64.saturating_add_unsigned(rewards.gold));
        user.increase_attribute(rewards.attribute, rewards.stat_boost);
        let new_level = user.level();

        self.store
            .commit(Changeset::new().with_task(task.clone()).with_user(user))
            .await?;
        info!(
            task_id = %task.id(),
            user_id = %user_id,
            xp = rewards.xp,
            gold = rewards.gold,
            halved = scale == RewardScale::Halved,
            "task completed"
        );
        if leveled_up {
            info!(user_id = %user_id, level = new_level, "player levelled up");
        }
        Ok(TaskCompletion {
            task,
            rewards,
            leveled_up,
            new_level,
        })
    }

    /// Declines an urgent call, charging its penalty.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] when the caller does not
    /// own the task or [`TaskDomainError::TaskNotActive`] when the task is
    /// not an open urgent call.
    pub async fn decline_urgent_call(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> TaskServiceResult<Task> {
        let mut task = self.load_owned_task(task_id, user_id).await?;
        let mut user = self.load_user(user_id).await?;

        task.fail(&*self.clock)?;
        let penalty = task.urgency().map_or(0, |urgency| urgency.penalty);
        user.add_gold(0_i64.saturating_sub_unsigned(penalty));

        self.store
            .commit(Changeset::new().with_task(task.clone()).with_user(user))
            .await?;
        info!(task_id = %task.id(), user_id = %user_id, penalty, "urgent call declined");
        Ok(task)
    }

    /// Returns the open tasks of a player and marks the player as active.
    ///
    /// A failure to record the activity is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskRepository`] when the lookup fails.
    pub async fn active_tasks(&self, user_id: UserId) -> TaskServiceResult<Vec<Task>> {
        if let Err(err) = self
            .store
            .users()
            .record_activity(user_id, self.clock.utc())
            .await
        {
            warn!(user_id = %user_id, error = %err, "failed to record activity");
        }
        Ok(self.store.tasks().find_active_by_user(user_id).await?)
    }

    /// Returns every task of a player, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskRepository`] when the lookup fails.
    pub async fn tasks_for_user(&self, user_id: UserId) -> TaskServiceResult<Vec<Task>> {
        Ok(self.store.tasks().find_by_user(user_id).await?)
    }

    /// Returns the open urgent calls of a player, soonest deadline first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskRepository`] when the lookup fails.
    pub async fn urgent_tasks(&self, user_id: UserId) -> TaskServiceResult<Vec<Task>> {
        Ok(self.store.tasks().find_urgent_by_user(user_id).await?)
    }

    /// Returns the daily tasks a player created since UTC midnight.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskRepository`] when the lookup fails.
    pub async fn daily_tasks_for_today(&self, user_id: UserId) -> TaskServiceResult<Vec<Task>> {
        let since = start_of_day(self.clock.utc());
        Ok(self
            .store
            .tasks()
            .find_daily_created_since(user_id, since)
            .await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.store
            .tasks()
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    async fn load_owned_task(&self, task_id: TaskId, user_id: UserId) -> TaskServiceResult<Task> {
        let task = self.find_by_id(task_id).await?;
        if task.owner() != user_id {
            return Err(TaskServiceError::Unauthorized { task_id, user_id });
        }
        Ok(task)
    }

    async fn load_user(&self, user_id: UserId) -> TaskServiceResult<User> {
        self.store
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(TaskServiceError::UserNotFound(user_id))
    }
}

fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}
