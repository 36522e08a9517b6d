//! Error types for task lifecycle rules and parsing.

use super::{TaskId, TaskStatus};
use crate::error::DomainErrorKind;
use thiserror::Error;

/// Rule violations raised by the task aggregate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task is not in a state that accepts the requested action.
    #[error("task {task_id} is not active (status: {status})")]
    TaskNotActive {
        /// Task identifier.
        task_id: TaskId,
        /// Status at the time of the attempt.
        status: TaskStatus,
    },

    /// The task has not been started.
    #[error("task {task_id} is not in progress (status: {status})")]
    TaskNotInProgress {
        /// Task identifier.
        task_id: TaskId,
        /// Status at the time of the attempt.
        status: TaskStatus,
    },

    /// The urgent deadline has passed.
    #[error("task {0} has expired")]
    TaskExpired(TaskId),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The trimmed title exceeds the stored column width.
    #[error("task title has {length} characters, at most {max} allowed")]
    TitleTooLong {
        /// Characters in the trimmed title.
        length: usize,
        /// Accepted maximum.
        max: usize,
    },

    /// An urgent window must end in the future.
    #[error("urgent duration must be positive")]
    InvalidUrgentDuration,
}

impl TaskDomainError {
    /// Classifies the violation.
    #[must_use]
    pub const fn kind(&self) -> DomainErrorKind {
        match self {
            Self::TaskNotActive { .. } => DomainErrorKind::TaskNotActive,
            Self::TaskNotInProgress { .. } => DomainErrorKind::TaskNotInProgress,
            Self::TaskExpired(_) => DomainErrorKind::TaskExpired,
            Self::EmptyTitle | Self::TitleTooLong { .. } | Self::InvalidUrgentDuration => {
                DomainErrorKind::InvalidInput
            }
        }
    }
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task frequencies from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task frequency: {0}")]
pub struct ParseTaskFrequencyError(pub String);
