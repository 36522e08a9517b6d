//! Unit-of-work port.

use crate::error::DomainErrorKind;
use crate::task::{
    domain::Task,
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::User,
    ports::{UserRepository, UserRepositoryError},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for unit-of-work operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Aggregates written together by one use case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    created_tasks: Vec<Task>,
    updated_tasks: Vec<Task>,
    updated_users: Vec<User>,
}

impl Changeset {
    /// Creates an empty changeset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task that does not exist yet.
    #[must_use]
    pub fn with_new_task(mut self, task: Task) -> Self {
        self.created_tasks.push(task);
        self
    }

    /// Adds an existing task to overwrite.
    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.updated_tasks.push(task);
        self
    }

    /// Adds an existing user to overwrite.
    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.updated_users.push(user);
        self
    }

    /// Returns tasks to insert.
    #[must_use]
    pub fn created_tasks(&self) -> &[Task] {
        &self.created_tasks
    }

    /// Returns tasks to overwrite.
    #[must_use]
    pub fn updated_tasks(&self) -> &[Task] {
        &self.updated_tasks
    }

    /// Returns users to overwrite.
    #[must_use]
    pub fn updated_users(&self) -> &[User] {
        &self.updated_users
    }

    /// Returns whether nothing would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created_tasks.is_empty()
            && self.updated_tasks.is_empty()
            && self.updated_users.is_empty()
    }
}

/// Storage facade exposing both repositories plus atomic commits.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// User repository sharing this store's backing storage.
    type Users: UserRepository;
    /// Task repository sharing this store's backing storage.
    type Tasks: TaskRepository;

    /// Returns the user repository.
    fn users(&self) -> &Self::Users;

    /// Returns the task repository.
    fn tasks(&self) -> &Self::Tasks;

    /// Applies every change in `changeset`, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Users`] or [`StoreError::Tasks`] with a
    /// not-found or duplicate error when the changeset does not match the
    /// stored state, or [`StoreError::Persistence`] on backend failure.
    async fn commit(&self, changeset: Changeset) -> StoreResult<()>;
}

/// Errors returned by unit-of-work implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A user write was rejected.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),

    /// A task write was rejected.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Backend failure outside either repository.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error; `None` for infrastructure failures.
    #[must_use]
    pub const fn kind(&self) -> Option<DomainErrorKind> {
        match self {
            Self::Users(err) => err.kind(),
            Self::Tasks(err) => err.kind(),
            Self::Persistence(_) => None,
        }
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
