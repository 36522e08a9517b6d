//! Advisor returning canned answers.

use crate::advisor::{
    Advisor, AdvisorError, AdvisorResult, ChatMessage, TaskAnalysis, UrgentCallSuggestion,
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Advisor that answers every request with a preconfigured value.
///
/// Requests without a configured answer fail with
/// [`AdvisorError::Unavailable`]. Clones share the call counter.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAdvisor {
    analysis: Option<TaskAnalysis>,
    reply: Option<String>,
    urgent_call: Option<UrgentCallSuggestion>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedAdvisor {
    /// Creates an advisor with no answers configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers task classification requests with `analysis`.
    #[must_use]
    pub fn with_analysis(mut self, analysis: TaskAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    /// Answers chat turns with `reply`.
    #[must_use]
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Answers urgent-call requests with `suggestion`.
    #[must_use]
    pub fn with_urgent_call(mut self, suggestion: UrgentCallSuggestion) -> Self {
        self.urgent_call = Some(suggestion);
        self
    }

    /// Returns how many requests this advisor has received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer<T: Clone>(&self, answer: Option<&T>) -> AdvisorResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        answer.cloned().ok_or(AdvisorError::Unavailable)
    }
}

#[async_trait]
impl Advisor for ScriptedAdvisor {
    async fn analyze_task(&self, _title: &str, _description: &str) -> AdvisorResult<TaskAnalysis> {
        self.answer(self.analysis.as_ref())
    }

    async fn chat(
        &self,
        _user_id: UserId,
        _message: &str,
        _history: &[ChatMessage],
    ) -> AdvisorResult<String> {
        self.answer(self.reply.as_ref())
    }

    async fn generate_urgent_call(&self, _user_id: UserId) -> AdvisorResult<UrgentCallSuggestion> {
        self.answer(self.urgent_call.as_ref())
    }
}
