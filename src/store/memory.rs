//! In-memory unit of work.

use super::{Changeset, GameStore, StoreResult};
use crate::task::{adapters::memory::InMemoryTaskRepository, ports::TaskRepositoryError};
use crate::user::{adapters::memory::InMemoryUserRepository, ports::UserRepositoryError};
use async_trait::async_trait;
use std::collections::HashSet;

/// Game store backed by the in-memory repositories.
///
/// Commits hold the user lock and then the task lock, validate every change
/// and only then apply them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameStore {
    users: InMemoryUserRepository,
    tasks: InMemoryTaskRepository,
}

impl InMemoryGameStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    type Users = InMemoryUserRepository;
    type Tasks = InMemoryTaskRepository;

    fn users(&self) -> &Self::Users {
        &self.users
    }

    fn tasks(&self) -> &Self::Tasks {
        &self.tasks
    }

    async fn commit(&self, changeset: Changeset) -> StoreResult<()> {
        let mut users = self.users.write_state()?;
        let mut tasks = self.tasks.write_state()?;

        if let Some(user) = changeset
            .updated_users()
            .iter()
            .find(|user| !users.contains(user.id()))
        {
            return Err(UserRepositoryError::NotFound(user.id()).into());
        }
        if let Some(task) = changeset
            .updated_tasks()
            .iter()
            .find(|task| !tasks.contains(task.id()))
        {
            return Err(TaskRepositoryError::NotFound(task.id()).into());
        }
        let mut fresh = HashSet::new();
        if let Some(task) = changeset
            .created_tasks()
            .iter()
            .find(|task| tasks.contains(task.id()) || !fresh.insert(task.id()))
        {
            return Err(TaskRepositoryError::DuplicateTask(task.id()).into());
        }

        for task in changeset.created_tasks() {
            tasks.insert(task);
        }
        for task in changeset.updated_tasks() {
            tasks.replace(task);
        }
        for user in changeset.updated_users() {
            users.replace(user);
        }
        Ok(())
    }
}
