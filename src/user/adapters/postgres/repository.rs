//! `PostgreSQL` repository implementation for player storage.

use super::{models::UserRow, schema::users};
use crate::store::postgres::PgPool;
use crate::user::{
    domain::{
        AdvisoryQuota, Attributes, ExternalAccountId, License, PersistedUserData, User, UserId,
        UserProfile,
    },
    ports::{InactivityCriteria, Page, UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let external_id = user.external_id();
        let row = to_row(user)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_external_id_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateExternalId(external_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let updated = user.clone();
        self.run_blocking(move |connection| update_user(connection, &updated))
            .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_external_id(
        &self,
        external_id: ExternalAccountId,
    ) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::external_id.eq(external_id.value()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list(&self, page: Page) -> UserRepositoryResult<Vec<User>> {
        let limit = i64::try_from(page.limit).map_err(UserRepositoryError::persistence)?;
        let offset = i64::try_from(page.offset).map_err(UserRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = users::table
                .order((users::level.desc(), users::xp.desc()))
                .limit(limit)
                .offset(offset)
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn find_inactive(&self, criteria: InactivityCriteria) -> UserRepositoryResult<Vec<User>> {
        let limit = i64::try_from(criteria.limit).map_err(UserRepositoryError::persistence)?;
        let min_gold =
            i64::try_from(criteria.min_gold_exclusive).map_err(UserRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::last_active_at.lt(criteria.active_before))
                .filter(users::gold.gt(min_gold))
                .order(users::gold.desc())
                .limit(limit)
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn record_activity(&self, id: UserId, at: DateTime<Utc>) -> UserRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::update(users::table.find(id.into_inner()))
                .set(users::last_active_at.eq(at))
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
            if affected == 0 {
                return Err(UserRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Writes every column of an existing user row on `connection`.
///
/// Shared with the unit-of-work adapter so that commits reuse the same row
/// mapping inside a transaction.
pub(crate) fn update_user(connection: &mut PgConnection, user: &User) -> UserRepositoryResult<()> {
    let row = to_row(user)?;
    let affected = diesel::update(users::table.find(row.id))
        .set(&row)
        .execute(connection)
        .map_err(UserRepositoryError::persistence)?;
    if affected == 0 {
        return Err(UserRepositoryError::NotFound(user.id()));
    }
    Ok(())
}

fn to_row(user: &User) -> UserRepositoryResult<UserRow> {
    let attributes = user.attributes();
    let license = user.license();
    let advisory = user.advisory();
    Ok(UserRow {
        id: user.id().into_inner(),
        external_id: user.external_id().value(),
        username: user.profile().username.clone(),
        first_name: user.profile().first_name.clone(),
        photo_url: user.profile().photo_url.clone(),
        level: to_i32(user.level())?,
        xp: to_i64(user.xp())?,
        xp_to_next_level: to_i64(user.xp_to_next_level())?,
        gold: to_i64(user.gold())?,
        energy: to_i32(user.energy())?,
        max_energy: to_i32(user.max_energy())?,
        strength: to_i32(attributes.strength)?,
        agility: to_i32(attributes.agility)?,
        intelligence: to_i32(attributes.intelligence)?,
        insight: to_i32(attributes.insight)?,
        license_active: license.active,
        license_expires_at: license.expires_at,
        license_checked_at: license.last_checked_at,
        advisory_requests: to_i32(advisory.remaining)?,
        advisory_resets_at: advisory.resets_at,
        created_at: user.created_at(),
        last_active_at: user.last_active_at(),
    })
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let data = PersistedUserData {
        id: UserId::from_uuid(row.id),
        external_id: ExternalAccountId::new(row.external_id),
        profile: UserProfile::new(row.username, row.first_name, row.photo_url),
        level: from_i32(row.level)?,
        xp: from_i64(row.xp)?,
        gold: from_i64(row.gold)?,
        energy: from_i32(row.energy)?,
        max_energy: from_i32(row.max_energy)?,
        attributes: Attributes {
            strength: from_i32(row.strength)?,
            agility: from_i32(row.agility)?,
            intelligence: from_i32(row.intelligence)?,
            insight: from_i32(row.insight)?,
        },
        license: License {
            active: row.license_active,
            expires_at: row.license_expires_at,
            last_checked_at: row.license_checked_at,
        },
        advisory: AdvisoryQuota {
            remaining: from_i32(row.advisory_requests)?,
            resets_at: row.advisory_resets_at,
        },
        created_at: row.created_at,
        last_active_at: row.last_active_at,
    };
    Ok(User::from_persisted(data))
}

fn to_i32(value: u32) -> UserRepositoryResult<i32> {
    i32::try_from(value).map_err(UserRepositoryError::persistence)
}

fn to_i64(value: u64) -> UserRepositoryResult<i64> {
    i64::try_from(value).map_err(UserRepositoryError::persistence)
}

fn from_i32(value: i32) -> UserRepositoryResult<u32> {
    u32::try_from(value).map_err(UserRepositoryError::persistence)
}

fn from_i64(value: i64) -> UserRepositoryResult<u64> {
    u64::try_from(value).map_err(UserRepositoryError::persistence)
}

fn is_external_id_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_users_external_id_unique")
}
