//! `PostgreSQL` unit of work.

use super::{Changeset, GameStore, StoreError, StoreResult};
use crate::config::StorageConfig;
use crate::task::adapters::postgres::{PostgresTaskRepository, insert_task, update_task};
use crate::user::adapters::postgres::{PostgresUserRepository, update_user};
use async_trait::async_trait;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool shared by every adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from storage settings.
///
/// # Errors
///
/// Returns [`StoreError::Persistence`] when the pool cannot open its
/// initial connections.
pub fn connect(config: &StorageConfig) -> StoreResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    Pool::builder()
        .max_size(config.max_pool_size)
        .build(manager)
        .map_err(StoreError::persistence)
}

/// Game store whose commits run in a single database transaction.
#[derive(Debug, Clone)]
pub struct PostgresGameStore {
    pool: PgPool,
    users: PostgresUserRepository,
    tasks: PostgresTaskRepository,
}

impl PostgresGameStore {
    /// Creates a store and its repositories over one pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: PostgresUserRepository::new(pool.clone()),
            tasks: PostgresTaskRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl GameStore for PostgresGameStore {
    type Users = PostgresUserRepository;
    type Tasks = PostgresTaskRepository;

    fn users(&self) -> &Self::Users {
        &self.users
    }

    fn tasks(&self) -> &Self::Tasks {
        &self.tasks
    }

    async fn commit(&self, changeset: Changeset) -> StoreResult<()> {
        if changeset.is_empty() {
            return Ok(());
        }
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::persistence)?;
            connection.transaction::<_, StoreError, _>(|tx_conn| {
                for task in changeset.created_tasks() {
                    insert_task(tx_conn, task)?;
                }
                for task in changeset.updated_tasks() {
                    update_task(tx_conn, task)?;
                }
                for user in changeset.updated_users() {
                    update_user(tx_conn, user)?;
                }
                Ok(())
            })
        })
        .await
        .map_err(StoreError::persistence)?
    }
}
