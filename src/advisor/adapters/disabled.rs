//! Advisor used when no AI backend is wired.

use crate::advisor::{
    Advisor, AdvisorError, AdvisorResult, ChatMessage, TaskAnalysis, UrgentCallSuggestion,
};
use crate::user::domain::UserId;
use async_trait::async_trait;

/// Advisor that rejects every request with [`AdvisorError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAdvisor;

#[async_trait]
impl Advisor for DisabledAdvisor {
    async fn analyze_task(&self, _title: &str, _description: &str) -> AdvisorResult<TaskAnalysis> {
        Err(AdvisorError::Unavailable)
    }

    async fn chat(
        &self,
        _user_id: UserId,
        _message: &str,
        _history: &[ChatMessage],
    ) -> AdvisorResult<String> {
        Err(AdvisorError::Unavailable)
    }

    async fn generate_urgent_call(&self, _user_id: UserId) -> AdvisorResult<UrgentCallSuggestion> {
        Err(AdvisorError::Unavailable)
    }
}
