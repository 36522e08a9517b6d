//! Port for the advisory collaborator.

use super::domain::{ChatMessage, TaskAnalysis, UrgentCallSuggestion};
use crate::user::domain::UserId;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for advisor operations.
pub type AdvisorResult<T> = Result<T, AdvisorError>;

/// Advisory collaborator contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Classifies a task from its title and description.
    ///
    /// # Errors
    ///
    /// Returns an [`AdvisorError`] when no classification is available.
    async fn analyze_task(&self, title: &str, description: &str) -> AdvisorResult<TaskAnalysis>;

    /// Answers one chat turn given the earlier conversation.
    ///
    /// # Errors
    ///
    /// Returns an [`AdvisorError`] when no reply is available.
    async fn chat(
        &self,
        user_id: UserId,
        message: &str,
        history: &[ChatMessage],
    ) -> AdvisorResult<String>;

    /// Suggests an urgent call for a player.
    ///
    /// # Errors
    ///
    /// Returns an [`AdvisorError`] when no suggestion is available.
    async fn generate_urgent_call(&self, user_id: UserId) -> AdvisorResult<UrgentCallSuggestion>;
}

/// Errors returned by advisor implementations.
#[derive(Debug, Clone, Error)]
pub enum AdvisorError {
    /// No advisor is configured.
    #[error("advisor is not available")]
    Unavailable,
}
