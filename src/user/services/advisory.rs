//! Advisory chat use cases.

use super::player::{PlayerService, PlayerServiceResult};
use crate::advisor::{Advisor, ChatMessage};
use crate::store::GameStore;
use crate::user::{
    domain::{User, UserId},
    ports::UserRepository,
};
use mockable::Clock;
use tracing::{debug, warn};

impl<S, A, C> PlayerService<S, A, C>
where
    S: GameStore,
    A: Advisor,
    C: Clock + Send + Sync,
{
    /// Sends one chat turn to the advisor, consuming an advisory request.
    ///
    /// When the advisor fails the request is refunded and the advisor error
    /// is returned; there is no local fallback for chat.
    ///
    /// # Errors
    ///
    /// Returns [`crate::user::domain::UserDomainError::NoAdvisoryRequests`]
    /// when the quota is exhausted, or
    /// [`super::PlayerServiceError::Advisor`] when the advisor fails.
    pub async fn chat_with_advisor(
        &self,
        user_id: UserId,
        message: &str,
        history: &[ChatMessage],
    ) -> PlayerServiceResult<String> {
        let mut user = self.load_user(user_id).await?;
        user.use_advisory_request(&*self.clock)?;

        match self.advisor.chat(user.id(), message, history).await {
            Ok(reply) => {
                self.store.users().update(&user).await?;
                debug!(
                    user_id = %user_id,
                    remaining = user.advisory().remaining,
                    "advisory request answered"
                );
                Ok(reply)
            }
            Err(err) => {
                user.refund_advisory_request();
                if let Err(persist_err) = self.store.users().update(&user).await {
                    warn!(user_id = %user_id, error = %persist_err, "failed to persist refunded advisory request");
                }
                Err(err.into())
            }
        }
    }

    /// Buys one extra advisory request for `cost` gold.
    ///
    /// # Errors
    ///
    /// Returns [`crate::user::domain::UserDomainError::InsufficientGold`]
    /// when the player cannot pay.
    pub async fn buy_advisory_request(
        &self,
        user_id: UserId,
        cost: u64,
    ) -> PlayerServiceResult<User> {
        let mut user = self.load_user(user_id).await?;
        user.buy_advisory_request(cost)?;
        self.store.users().update(&user).await?;
        Ok(user)
    }
}
