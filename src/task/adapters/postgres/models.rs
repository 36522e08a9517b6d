//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shape shared by reads, inserts and full updates of task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning player.
    pub user_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Trained attribute.
    pub category: String,
    /// Recurrence kind.
    pub frequency: String,
    /// Lifecycle status.
    pub status: String,
    /// Experience reward.
    pub xp_reward: i64,
    /// Gold reward.
    pub gold_reward: i64,
    /// Attribute boost.
    pub stat_boost: i32,
    /// Energy paid when starting.
    pub energy_cost: i32,
    /// Gold paid when creating.
    pub gold_cost: i64,
    /// Urgent deadline.
    pub urgent_until: Option<DateTime<Utc>>,
    /// Gold deducted when declined.
    pub urgent_penalty: Option<i64>,
    /// Difficulty rating.
    pub difficulty: i32,
    /// Whether an assessor classified the task.
    pub ai_analyzed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
    /// Start timestamp.
    pub started_at: Option<DateTime<Utc>>,
    /// Completion or failure timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}
