//! Repository port for task persistence and per-player task queries.

use crate::error::DomainErrorKind;
use crate::task::domain::{Task, TaskId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status, rewards, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task owned by `owner`, newest first.
    async fn find_by_user(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the open (`active` or `in_progress`) tasks of `owner`,
    /// newest first.
    async fn find_active_by_user(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the daily tasks of `owner` created at or after `since`.
    async fn find_daily_created_since(
        &self,
        owner: UserId,
        since: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the open urgent tasks of `owner`, soonest deadline first.
    async fn find_urgent_by_user(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Marks every open urgent task whose deadline is before `now` as
    /// `expired` and returns how many changed.
    async fn expire_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error; `None` for infrastructure failures.
    #[must_use]
    pub const fn kind(&self) -> Option<DomainErrorKind> {
        match self {
            Self::NotFound(_) => Some(DomainErrorKind::NotFound),
            Self::DuplicateTask(_) | Self::Persistence(_) => None,
        }
    }
}
