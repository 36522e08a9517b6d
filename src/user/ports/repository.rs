//! Repository port for user persistence and player lookups.

use crate::error::DomainErrorKind;
use crate::user::domain::{ExternalAccountId, User, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of rows returned.
    pub limit: usize,
    /// Number of rows skipped.
    pub offset: usize,
}

impl Page {
    /// Creates a pagination window.
    #[must_use]
    pub const fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(50, 0)
    }
}

/// Filter for players eligible to be raided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityCriteria {
    /// Players last active strictly before this instant qualify.
    pub active_before: DateTime<Utc>,
    /// Players must hold strictly more gold than this.
    pub min_gold_exclusive: u64,
    /// Maximum number of players returned.
    pub limit: usize,
}

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a newly registered user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the identifier
    /// exists or [`UserRepositoryError::DuplicateExternalId`] when the
    /// external account is already registered.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Replaces a stored user with the given aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by internal identifier.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by external account identifier.
    async fn find_by_external_id(
        &self,
        external_id: ExternalAccountId,
    ) -> UserRepositoryResult<Option<User>>;

    /// Lists users ordered by level then experience, highest first.
    async fn list(&self, page: Page) -> UserRepositoryResult<Vec<User>>;

    /// Lists players matching `criteria`, richest first.
    async fn find_inactive(&self, criteria: InactivityCriteria) -> UserRepositoryResult<Vec<User>>;

    /// Sets only the last-activity timestamp of a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist.
    async fn record_activity(&self, id: UserId, at: DateTime<Utc>) -> UserRepositoryResult<()>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// The external account is already registered.
    #[error("duplicate external account: {0}")]
    DuplicateExternalId(ExternalAccountId),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error; `None` for infrastructure failures.
    #[must_use]
    pub const fn kind(&self) -> Option<DomainErrorKind> {
        match self {
            Self::NotFound(_) => Some(DomainErrorKind::NotFound),
            Self::DuplicateUser(_) | Self::DuplicateExternalId(_) | Self::Persistence(_) => None,
        }
    }
}
