//! Player onboarding, profile and license use cases.

use crate::advisor::{Advisor, AdvisorError};
use crate::error::DomainErrorKind;
use crate::store::{GameStore, StoreError};
use crate::user::{
    domain::{ExternalAccountId, User, UserDomainError, UserId, UserProfile},
    ports::{Page, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Identity data supplied when a player signs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    external_id: ExternalAccountId,
    profile: UserProfile,
}

impl RegisterUserRequest {
    /// Creates a sign-in request.
    #[must_use]
    pub const fn new(external_id: ExternalAccountId, profile: UserProfile) -> Self {
        Self {
            external_id,
            profile,
        }
    }
}

/// Service-level errors for player operations.
#[derive(Debug, Error)]
pub enum PlayerServiceError {
    /// A player rule was violated.
    #[error(transparent)]
    User(#[from] UserDomainError),
    /// The player does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// User storage failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// The atomic write failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The advisor could not answer.
    #[error(transparent)]
    Advisor(#[from] AdvisorError),
}

impl PlayerServiceError {
    /// Classifies the error; `None` for infrastructure and advisor failures.
    #[must_use]
    pub const fn kind(&self) -> Option<DomainErrorKind> {
        match self {
            Self::User(err) => Some(err.kind()),
            Self::UserNotFound(_) => Some(DomainErrorKind::NotFound),
            Self::Repository(err) => err.kind(),
            Self::Store(err) => err.kind(),
            Self::Advisor(_) => None,
        }
    }
}

/// Result type for player service operations.
pub type PlayerServiceResult<T> = Result<T, PlayerServiceError>;

/// Player orchestration service.
#[derive(Clone)]
pub struct PlayerService<S, A, C>
where
    S: GameStore,
    A: Advisor,
    C: Clock + Send + Sync,
{
    pub(super) store: Arc<S>,
    pub(super) advisor: Arc<A>,
    pub(super) clock: Arc<C>,
}

impl<S, A, C> PlayerService<S, A, C>
where
    S: GameStore,
    A: Advisor,
    C: Clock + Send + Sync,
{
    /// Creates a new player service.
    #[must_use]
    pub const fn new(store: Arc<S>, advisor: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            store,
            advisor,
            clock,
        }
    }

    /// Returns the player behind an external account, registering them on
    /// first sight. Known players get their display fields refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerServiceError::Repository`] when lookup or persistence
    /// fails.
    pub async fn get_or_create_user(&self, request: RegisterUserRequest) -> PlayerServiceResult<User> {
        let users = self.store.users();
        if let Some(mut user) = users.find_by_external_id(request.external_id).await? {
            user.update_profile(request.profile, &*self.clock);
            users.update(&user).await?;
            return Ok(user);
        }

        let user = User::register(request.external_id, request.profile, &*self.clock);
        users.store(&user).await?;
        info!(user_id = %user.id(), external_id = %user.external_id(), "player registered");
        Ok(user)
    }

    /// Returns a player and marks them as active.
    ///
    /// Failing to persist the activity timestamp is logged, not returned.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerServiceError::UserNotFound`] for unknown players.
    pub async fn get_profile(&self, user_id: UserId) -> PlayerServiceResult<User> {
        let mut user = self.load_user(user_id).await?;
        user.record_activity(&*self.clock);
        if let Err(err) = self.store.users().update(&user).await {
            warn!(user_id = %user_id, error = %err, "failed to record profile activity");
        }
        Ok(user)
    }

    /// Renews a player's license for another seven days.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerServiceError::UserNotFound`] for unknown players.
    pub async fn renew_license(&self, user_id: UserId) -> PlayerServiceResult<User> {
        let mut user = self.load_user(user_id).await?;
        user.renew_license(&*self.clock);
        self.store.users().update(&user).await?;
        info!(user_id = %user_id, expires_at = %user.license().expires_at, "license renewed");
        Ok(user)
    }

    /// Lists players by level then experience, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerServiceError::Repository`] when the lookup fails.
    pub async fn leaderboard(&self, page: Page) -> PlayerServiceResult<Vec<User>> {
        Ok(self.store.users().list(page).await?)
    }

    pub(super) async fn load_user(&self, user_id: UserId) -> PlayerServiceResult<User> {
        self.store
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(PlayerServiceError::UserNotFound(user_id))
    }
}
