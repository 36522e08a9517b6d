//! Diesel row models for player persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shape shared by reads, inserts and full updates of player records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal user identifier.
    pub id: uuid::Uuid,
    /// External account identifier.
    pub external_id: i64,
    /// Account handle.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Avatar URL.
    pub photo_url: String,
    /// Current level.
    pub level: i32,
    /// Experience within the current level.
    pub xp: i64,
    /// Experience threshold for the next level.
    pub xp_to_next_level: i64,
    /// Gold balance.
    pub gold: i64,
    /// Current energy.
    pub energy: i32,
    /// Energy ceiling.
    pub max_energy: i32,
    /// Strength counter.
    pub strength: i32,
    /// Agility counter.
    pub agility: i32,
    /// Intelligence counter.
    pub intelligence: i32,
    /// Insight counter.
    pub insight: i32,
    /// License activation flag.
    pub license_active: bool,
    /// License expiry.
    pub license_expires_at: DateTime<Utc>,
    /// Last license renewal.
    pub license_checked_at: DateTime<Utc>,
    /// Advisory requests left.
    pub advisory_requests: i32,
    /// Advisory quota reset instant.
    pub advisory_resets_at: DateTime<Utc>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp.
    pub last_active_at: DateTime<Utc>,
}
