//! In-memory repository for players.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::user::{
    domain::{ExternalAccountId, User, UserId},
    ports::{InactivityCriteria, Page, UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
pub(crate) struct InMemoryUserState {
    users: HashMap<UserId, User>,
    external_index: HashMap<ExternalAccountId, UserId>,
}

impl InMemoryUserState {
    pub(crate) fn contains(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    /// Replaces an existing entry. External identifiers never change, so the
    /// index is left as is.
    pub(crate) fn replace(&mut self, user: &User) {
        self.users.insert(user.id(), user.clone());
    }
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> UserRepositoryResult<RwLockReadGuard<'_, InMemoryUserState>> {
        self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    pub(crate) fn write_state(
        &self,
    ) -> UserRepositoryResult<RwLockWriteGuard<'_, InMemoryUserState>> {
        self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.external_index.contains_key(&user.external_id()) {
            return Err(UserRepositoryError::DuplicateExternalId(user.external_id()));
        }

        state.external_index.insert(user.external_id(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.contains(user.id()) {
            return Err(UserRepositoryError::NotFound(user.id()));
        }
        state.replace(user);
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.read_state()?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_external_id(
        &self,
        external_id: ExternalAccountId,
    ) -> UserRepositoryResult<Option<User>> {
        let state = self.read_state()?;
        let user = state
            .external_index
            .get(&external_id)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn list(&self, page: Page) -> UserRepositoryResult<Vec<User>> {
        let state = self.read_state()?;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by_key(|user| Reverse((user.level(), user.xp())));
        Ok(users
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect())
    }

    async fn find_inactive(&self, criteria: InactivityCriteria) -> UserRepositoryResult<Vec<User>> {
        let state = self.read_state()?;
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|user| {
                user.last_active_at() < criteria.active_before
                    && user.gold() > criteria.min_gold_exclusive
            })
            .cloned()
            .collect();
        users.sort_by_key(|user| Reverse(user.gold()));
        users.truncate(criteria.limit);
        Ok(users)
    }

    async fn record_activity(&self, id: UserId, at: DateTime<Utc>) -> UserRepositoryResult<()> {
        let mut state = self.write_state()?;
        let user = state
            .users
            .get_mut(&id)
            .ok_or(UserRepositoryError::NotFound(id))?;
        user.set_last_active_at(at);
        Ok(())
    }
}
