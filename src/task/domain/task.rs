//! Task aggregate root and its lifecycle transitions.

use super::{
    RewardScale, TaskAssessment, TaskDomainError, TaskFrequency, TaskId, TaskRewards, TaskStatus,
};
use crate::user::domain::{Attribute, UserId};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const BASE_XP_PER_DIFFICULTY: u64 = 10;
const BASE_GOLD_PER_DIFFICULTY: u64 = 5;
const BASE_STAT_BOOST: u32 = 1;
const DEFAULT_DIFFICULTY: u32 = 1;

/// Longest accepted task title, in characters.
pub const MAX_TITLE_CHARS: usize = 255;

const DAILY_XP_REWARD: u64 = 15;
const DAILY_GOLD_REWARD: u64 = 5;
const DAILY_ENERGY_COST: u32 = 10;

const CUSTOM_ENERGY_COST: u32 = 10;
const CUSTOM_GOLD_COST: u64 = 10;

const URGENT_ENERGY_COST: u32 = 15;
const URGENT_PENALTY: u64 = 5;

/// Deadline and decline penalty of an urgent task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Urgency {
    /// Instant after which the task can no longer be started.
    pub until: DateTime<Utc>,
    /// Gold deducted when the task is declined.
    pub penalty: u64,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    title: String,
    description: String,
    attribute: Attribute,
    frequency: TaskFrequency,
    status: TaskStatus,
    xp_reward: u64,
    gold_reward: u64,
    stat_boost: u32,
    energy_cost: u32,
    gold_cost: u64,
    urgency: Option<Urgency>,
    difficulty: u32,
    ai_analyzed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted trained attribute.
    pub attribute: Attribute,
    /// Persisted recurrence kind.
    pub frequency: TaskFrequency,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted experience reward.
    pub xp_reward: u64,
    /// Persisted gold reward.
    pub gold_reward: u64,
    /// Persisted attribute boost.
    pub stat_boost: u32,
    /// Persisted energy cost.
    pub energy_cost: u32,
    /// Persisted creation fee.
    pub gold_cost: u64,
    /// Persisted urgency window, if any.
    pub urgency: Option<Urgency>,
    /// Persisted difficulty rating.
    pub difficulty: u32,
    /// Whether an assessor classified the task.
    pub ai_analyzed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted start timestamp.
    pub started_at: Option<DateTime<Utc>>,
    /// Persisted completion or failure timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}

struct TaskSeed {
    owner: UserId,
    title: String,
    description: String,
    attribute: Attribute,
    frequency: TaskFrequency,
    energy_cost: u32,
    gold_cost: u64,
}

impl Task {
    fn seed(seed: TaskSeed, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = seed.title.trim();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let length = title.chars().count();
        if length > MAX_TITLE_CHARS {
            return Err(TaskDomainError::TitleTooLong {
                length,
                max: MAX_TITLE_CHARS,
            });
        }
        let timestamp = clock.utc();
        let mut task = Self {
            id: TaskId::new(),
            owner: seed.owner,
            title: title.to_owned(),
            description: seed.description,
            attribute: seed.attribute,
            frequency: seed.frequency,
            status: TaskStatus::Active,
            xp_reward: 0,
            gold_reward: 0,
            stat_boost: BASE_STAT_BOOST,
            energy_cost: seed.energy_cost,
            gold_cost: seed.gold_cost,
            urgency: None,
            difficulty: DEFAULT_DIFFICULTY,
            ai_analyzed: false,
            created_at: timestamp,
            updated_at: timestamp,
            started_at: None,
            completed_at: None,
        };
        task.recompute_rewards();
        Ok(task)
    }

    /// Creates a daily task with fixed rewards and no creation fee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title or
    /// [`TaskDomainError::TitleTooLong`] past [`MAX_TITLE_CHARS`].
    pub fn new_daily(
        owner: UserId,
        title: impl Into<String>,
        attribute: Attribute,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let mut task = Self::seed(
            TaskSeed {
                owner,
                title: title.into(),
                description: String::new(),
                attribute,
                frequency: TaskFrequency::Daily,
                energy_cost: DAILY_ENERGY_COST,
                gold_cost: 0,
            },
            clock,
        )?;
        task.xp_reward = DAILY_XP_REWARD;
        task.gold_reward = DAILY_GOLD_REWARD;
        Ok(task)
    }

    /// Creates a player-defined task. The creation fee is recorded in
    /// [`Task::gold_cost`] and charged by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title or
    /// [`TaskDomainError::TitleTooLong`] past [`MAX_TITLE_CHARS`].
    pub fn new_custom(
        owner: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        attribute: Attribute,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        Self::seed(
            TaskSeed {
                owner,
                title: title.into(),
                description: description.into(),
                attribute,
                frequency: TaskFrequency::Custom,
                energy_cost: CUSTOM_ENERGY_COST,
                gold_cost: CUSTOM_GOLD_COST,
            },
            clock,
        )
    }

    /// Creates an urgent call that must be started within `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::TitleTooLong`] for an unusable title and
    /// [`TaskDomainError::InvalidUrgentDuration`] for a non-positive window.
    pub fn new_urgent_call(
        owner: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        attribute: Attribute,
        duration: TimeDelta,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let mut task = Self::seed(
            TaskSeed {
                owner,
                title: title.into(),
                description: description.into(),
                attribute,
                frequency: TaskFrequency::Urgent,
                energy_cost: URGENT_ENERGY_COST,
                gold_cost: 0,
            },
            clock,
        )?;
        task.set_urgent(duration, URGENT_PENALTY, clock)?;
        Ok(task)
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            description: data.description,
            attribute: data.attribute,
            frequency: data.frequency,
            status: data.status,
            xp_reward: data.xp_reward,
            gold_reward: data.gold_reward,
            stat_boost: data.stat_boost,
            energy_cost: data.energy_cost,
            gold_cost: data.gold_cost,
            urgency: data.urgency,
            difficulty: data.difficulty,
            ai_analyzed: data.ai_analyzed,
            created_at: data.created_at,
            updated_at: data.updated_at,
            started_at: data.started_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the attribute the task trains.
    #[must_use]
    pub const fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Returns the recurrence kind.
    #[must_use]
    pub const fn frequency(&self) -> TaskFrequency {
        self.frequency
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the experience reward.
    #[must_use]
    pub const fn xp_reward(&self) -> u64 {
        self.xp_reward
    }

    /// Returns the gold reward.
    #[must_use]
    pub const fn gold_reward(&self) -> u64 {
        self.gold_reward
    }

    /// Returns the attribute boost.
    #[must_use]
    pub const fn stat_boost(&self) -> u32 {
        self.stat_boost
    }

    /// Returns the energy paid when starting.
    #[must_use]
    pub const fn energy_cost(&self) -> u32 {
        self.energy_cost
    }

    /// Returns the gold paid when creating.
    #[must_use]
    pub const fn gold_cost(&self) -> u64 {
        self.gold_cost
    }

    /// Returns whether this is an urgent call.
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        self.urgency.is_some()
    }

    /// Returns the urgency window, if any.
    #[must_use]
    pub const fn urgency(&self) -> Option<&Urgency> {
        self.urgency.as_ref()
    }

    /// Returns the difficulty rating.
    #[must_use]
    pub const fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Returns whether an assessor classified the task.
    #[must_use]
    pub const fn ai_analyzed(&self) -> bool {
        self.ai_analyzed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the task was started.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when the task was completed or failed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the rewards this task grants.
    #[must_use]
    pub const fn rewards(&self) -> TaskRewards {
        TaskRewards {
            xp: self.xp_reward,
            gold: self.gold_reward,
            stat_boost: self.stat_boost,
            attribute: self.attribute,
        }
    }

    /// Derives rewards from difficulty: ten experience and five gold per
    /// difficulty point, boosted by half for urgent calls.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] once the task has left
    /// `active`; rewards are frozen from then on.
    pub fn calculate_rewards(&mut self) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        self.recompute_rewards();
        Ok(())
    }

    #[expect(
        clippy::integer_division,
        reason = "urgent boost truncates toward zero"
    )]
    fn recompute_rewards(&mut self) {
        let difficulty = u64::from(self.difficulty.max(DEFAULT_DIFFICULTY));

        self.xp_reward = BASE_XP_PER_DIFFICULTY.saturating_mul(difficulty);
        self.gold_reward = BASE_GOLD_PER_DIFFICULTY.saturating_mul(difficulty);
        self.stat_boost = BASE_STAT_BOOST;

        if self.is_urgent() {
            self.xp_reward = self.xp_reward.saturating_mul(3) / 2;
            self.gold_reward = self.gold_reward.saturating_mul(3) / 2;
        }
    }

    /// Turns the task into an urgent call expiring `duration` from now and
    /// recalculates its rewards.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] once the task has left
    /// `active`, or [`TaskDomainError::InvalidUrgentDuration`] for a
    /// non-positive window.
    pub fn set_urgent(
        &mut self,
        duration: TimeDelta,
        penalty: u64,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        if duration <= TimeDelta::zero() {
            return Err(TaskDomainError::InvalidUrgentDuration);
        }
        let now = clock.utc();
        self.frequency = TaskFrequency::Urgent;
        self.urgency = Some(Urgency {
            until: now + duration,
            penalty,
        });
        self.recompute_rewards();
        self.updated_at = now;
        Ok(())
    }

    /// Overwrites classification and economics with an external assessment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] once the task has left
    /// `active`.
    pub fn apply_assessment(&mut self, assessment: TaskAssessment) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        self.attribute = assessment.attribute;
        self.difficulty = assessment.difficulty;
        self.xp_reward = assessment.xp_reward;
        self.gold_reward = assessment.gold_reward;
        self.energy_cost = assessment.energy_cost;
        self.ai_analyzed = true;
        Ok(())
    }

    /// Checks whether the task may be started now.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] unless the task is
    /// `active`, or [`TaskDomainError::TaskExpired`] when an urgent deadline
    /// has passed.
    pub fn can_start(&self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_active()?;
        if self.is_expired(clock) {
            return Err(TaskDomainError::TaskExpired(self.id));
        }
        Ok(())
    }

    /// Moves the task from `active` to `in_progress`.
    ///
    /// # Errors
    ///
    /// See [`Task::can_start`].
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.can_start(clock)?;
        let now = clock.utc();
        self.status = TaskStatus::InProgress;
        self.started_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Checks whether the task may be completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotInProgress`] unless the task is
    /// `in_progress`.
    pub const fn can_complete(&self) -> Result<(), TaskDomainError> {
        if !matches!(self.status, TaskStatus::InProgress) {
            return Err(TaskDomainError::TaskNotInProgress {
                task_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Completes the task, fixing the granted rewards at `scale`, and
    /// returns what the player earns.
    ///
    /// # Errors
    ///
    /// See [`Task::can_complete`]. Rewards are untouched on failure.
    #[expect(
        clippy::integer_division,
        reason = "halved rewards round down"
    )]
    pub fn complete(
        &mut self,
        scale: RewardScale,
        clock: &impl Clock,
    ) -> Result<TaskRewards, TaskDomainError> {
        self.can_complete()?;
        if scale == RewardScale::Halved {
            self.xp_reward /= 2;
            self.gold_reward /= 2;
        }
        let now = clock.utc();
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now);
        self.updated_at = now;
        Ok(self.rewards())
    }

    /// Declines an open urgent call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskNotActive`] when the task is not
    /// urgent or has already reached a terminal status.
    pub fn fail(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if !self.is_urgent() || !self.status.is_open() {
            return Err(TaskDomainError::TaskNotActive {
                task_id: self.id,
                status: self.status,
            });
        }
        let now = clock.utc();
        self.status = TaskStatus::Failed;
        self.completed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Returns whether the urgent deadline has passed.
    #[must_use]
    pub fn is_expired(&self, clock: &impl Clock) -> bool {
        self.urgency
            .is_some_and(|urgency| clock.utc() > urgency.until)
    }

    /// Marks an open urgent task whose deadline has passed as expired.
    /// Returns whether the status changed.
    pub fn expire(&mut self, clock: &impl Clock) -> bool {
        if !self.status.is_open() || !self.is_expired(clock) {
            return false;
        }
        self.mark_expired();
        true
    }

    /// Sets the status to `expired` without checking the deadline. Used by
    /// bulk sweeps that filter on the deadline themselves.
    pub(crate) const fn mark_expired(&mut self) {
        self.status = TaskStatus::Expired;
    }

    /// Returns the time left before the urgent deadline, never negative.
    /// Non-urgent tasks always report zero.
    #[must_use]
    pub fn time_remaining(&self, clock: &impl Clock) -> TimeDelta {
        self.urgency.map_or_else(TimeDelta::zero, |urgency| {
            (urgency.until - clock.utc()).max(TimeDelta::zero())
        })
    }

    const fn ensure_active(&self) -> Result<(), TaskDomainError> {
        if !matches!(self.status, TaskStatus::Active) {
            return Err(TaskDomainError::TaskNotActive {
                task_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }
}
