//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{models::TaskRow, schema::tasks};
use crate::store::postgres::PgPool;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskFrequency, TaskId, TaskStatus, Urgency},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::{Attribute, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const OPEN_STATUSES: [&str; 2] = ["active", "in_progress"];

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }

    async fn load_many<F>(&self, query: F) -> TaskRepositoryResult<Vec<Task>>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<Vec<TaskRow>> + Send + 'static,
    {
        self.run_blocking(move |connection| {
            let rows = query(connection).map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let created = task.clone();
        self.run_blocking(move |connection| insert_task(connection, &created))
            .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let updated = task.clone();
        self.run_blocking(move |connection| update_task(connection, &updated))
            .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_user(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.load_many(move |connection| {
            tasks::table
                .filter(tasks::user_id.eq(owner.into_inner()))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load(connection)
        })
        .await
    }

    async fn find_active_by_user(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.load_many(move |connection| {
            tasks::table
                .filter(tasks::user_id.eq(owner.into_inner()))
                .filter(tasks::status.eq_any(OPEN_STATUSES))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load(connection)
        })
        .await
    }

    async fn find_daily_created_since(
        &self,
        owner: UserId,
        since: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.load_many(move |connection| {
            tasks::table
                .filter(tasks::user_id.eq(owner.into_inner()))
                .filter(tasks::frequency.eq(TaskFrequency::Daily.as_str()))
                .filter(tasks::created_at.ge(since))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load(connection)
        })
        .await
    }

    async fn find_urgent_by_user(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.load_many(move |connection| {
            tasks::table
                .filter(tasks::user_id.eq(owner.into_inner()))
                .filter(tasks::urgent_until.is_not_null())
                .filter(tasks::status.eq_any(OPEN_STATUSES))
                .order(tasks::urgent_until.asc())
                .select(TaskRow::as_select())
                .load(connection)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::update(
                tasks::table
                    .filter(tasks::urgent_until.lt(now))
                    .filter(tasks::status.eq_any(OPEN_STATUSES)),
            )
            .set(tasks::status.eq(TaskStatus::Expired.as_str()))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

/// Inserts a new task row on `connection`.
pub(crate) fn insert_task(connection: &mut PgConnection, task: &Task) -> TaskRepositoryResult<()> {
    let task_id = task.id();
    let row = to_row(task)?;
    diesel::insert_into(tasks::table)
        .values(&row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                TaskRepositoryError::DuplicateTask(task_id)
            }
            _ => TaskRepositoryError::persistence(err),
        })?;
    Ok(())
}

/// Writes every column of an existing task row on `connection`.
pub(crate) fn update_task(connection: &mut PgConnection, task: &Task) -> TaskRepositoryResult<()> {
    let row = to_row(task)?;
    let affected = diesel::update(tasks::table.find(row.id))
        .set(&row)
        .execute(connection)
        .map_err(TaskRepositoryError::persistence)?;
    if affected == 0 {
        return Err(TaskRepositoryError::NotFound(task.id()));
    }
    Ok(())
}

fn to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    let urgency = task.urgency().copied();
    Ok(TaskRow {
        id: task.id().into_inner(),
        user_id: task.owner().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        category: task.attribute().as_str().to_owned(),
        frequency: task.frequency().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        xp_reward: to_i64(task.xp_reward())?,
        gold_reward: to_i64(task.gold_reward())?,
        stat_boost: to_i32(task.stat_boost())?,
        energy_cost: to_i32(task.energy_cost())?,
        gold_cost: to_i64(task.gold_cost())?,
        urgent_until: urgency.map(|window| window.until),
        urgent_penalty: urgency.map(|window| to_i64(window.penalty)).transpose()?,
        difficulty: to_i32(task.difficulty())?,
        ai_analyzed: task.ai_analyzed(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        started_at: task.started_at(),
        completed_at: task.completed_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let attribute =
        Attribute::try_from(row.category.as_str()).map_err(TaskRepositoryError::persistence)?;
    let frequency =
        TaskFrequency::try_from(row.frequency.as_str()).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let urgency = match (row.urgent_until, row.urgent_penalty) {
        (Some(until), penalty) => Some(Urgency {
            until,
            penalty: penalty.map(from_i64).transpose()?.unwrap_or_default(),
        }),
        (None, _) => None,
    };

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        owner: UserId::from_uuid(row.user_id),
        title: row.title,
        description: row.description,
        attribute,
        frequency,
        status,
        xp_reward: from_i64(row.xp_reward)?,
        gold_reward: from_i64(row.gold_reward)?,
        stat_boost: from_i32(row.stat_boost)?,
        energy_cost: from_i32(row.energy_cost)?,
        gold_cost: from_i64(row.gold_cost)?,
        urgency,
        difficulty: from_i32(row.difficulty)?,
        ai_analyzed: row.ai_analyzed,
        created_at: row.created_at,
        updated_at: row.updated_at,
        started_at: row.started_at,
        completed_at: row.completed_at,
    };
    Ok(Task::from_persisted(data))
}

fn to_i32(value: u32) -> TaskRepositoryResult<i32> {
    i32::try_from(value).map_err(TaskRepositoryError::persistence)
}

fn to_i64(value: u64) -> TaskRepositoryResult<i64> {
    i64::try_from(value).map_err(TaskRepositoryError::persistence)
}

fn from_i32(value: i32) -> TaskRepositoryResult<u32> {
    u32::try_from(value).map_err(TaskRepositoryError::persistence)
}

fn from_i64(value: i64) -> TaskRepositoryResult<u64> {
    u64::try_from(value).map_err(TaskRepositoryError::persistence)
}
