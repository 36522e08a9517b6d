//! Values exchanged with the advisory collaborator.

use crate::task::domain::TaskAssessment;
use crate::user::domain::Attribute;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Classification of a custom task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAnalysis {
    /// Economics to apply to the task.
    pub assessment: TaskAssessment,
    /// Short reasoning shown to the player.
    pub explanation: String,
}

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// The player.
    User,
    /// The advisor.
    Assistant,
}

/// One earlier turn of an advisory conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a player turn.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Creates an advisor turn.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Urgent call proposed for a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgentCallSuggestion {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Trained attribute.
    pub attribute: Attribute,
    /// Window in which the call must be started, in minutes.
    pub duration_minutes: u32,
}

impl UrgentCallSuggestion {
    /// Returns the window as a duration.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.duration_minutes))
    }
}
