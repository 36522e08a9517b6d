//! Periodic expiry of overdue urgent calls.

use crate::task::ports::{TaskRepository, TaskRepositoryResult};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Marks overdue urgent calls as expired.
#[derive(Clone)]
pub struct ExpirySweepService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ExpirySweepService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sweep over `repository`.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Runs one sweep and returns how many tasks expired.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub async fn run(&self) -> TaskRepositoryResult<usize> {
        let now = self.clock.utc();
        let expired = self.repository.expire_overdue(now).await?;
        info!(expired, at = %now, "expiry sweep finished");
        Ok(expired)
    }
}
