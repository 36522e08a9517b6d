//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Task, TaskFrequency, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
pub(crate) struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    owner_index: HashMap<UserId, Vec<TaskId>>,
}

impl InMemoryTaskState {
    pub(crate) fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    pub(crate) fn insert(&mut self, task: &Task) {
        self.owner_index
            .entry(task.owner())
            .or_default()
            .push(task.id());
        self.tasks.insert(task.id(), task.clone());
    }

    /// Replaces an existing entry. Owners never change, so the index is left
    /// as is.
    pub(crate) fn replace(&mut self, task: &Task) {
        self.tasks.insert(task.id(), task.clone());
    }

    fn owned_by(&self, owner: UserId, keep: impl Fn(&Task) -> bool) -> Vec<Task> {
        let mut owned: Vec<Task> = self
            .owner_index
            .get(&owner)
            .into_iter()
            .flatten()
            .filter_map(|id| self.tasks.get(id))
            .filter(|task| keep(task))
            .cloned()
            .collect();
        owned.sort_by_key(|task| Reverse(task.created_at()));
        owned
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    pub(crate) fn write_state(
        &self,
    ) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.contains(task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task);
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.contains(task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.replace(task);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_user(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state.owned_by(owner, |_| true))
    }

    async fn find_active_by_user(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state.owned_by(owner, |task| task.status().is_open()))
    }

    async fn find_daily_created_since(
        &self,
        owner: UserId,
        since: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state.owned_by(owner, |task| {
            task.frequency() == TaskFrequency::Daily && task.created_at() >= since
        }))
    }

    async fn find_urgent_by_user(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        let mut urgent = state.owned_by(owner, |task| task.is_urgent() && task.status().is_open());
        urgent.sort_by_key(|task| task.urgency().map(|urgency| urgency.until));
        Ok(urgent)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        let removed = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        if let Some(ids) = state.owner_index.get_mut(&removed.owner()) {
            ids.retain(|owned| *owned != id);
            if ids.is_empty() {
                state.owner_index.remove(&removed.owner());
            }
        }
        Ok(())
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<usize> {
        let mut state = self.write_state()?;
        let mut expired = 0;
        for task in state.tasks.values_mut() {
            let overdue = task.status().is_open()
                && task.urgency().is_some_and(|urgency| urgency.until < now);
            if overdue {
                task.mark_expired();
                expired += 1;
            }
        }
        Ok(expired)
    }
}

