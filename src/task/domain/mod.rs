//! Domain model for task lifecycle management.
//!
//! A task moves through a small state machine (`active` to `in_progress` to
//! `completed`, with `failed` and `expired` as exits for urgent calls) and
//! carries the reward economics granted on completion.

mod error;
mod frequency;
mod ids;
mod rewards;
mod status;
mod task;

pub use error::{ParseTaskFrequencyError, ParseTaskStatusError, TaskDomainError};
pub use frequency::TaskFrequency;
pub use ids::TaskId;
pub use rewards::{RewardScale, TaskAssessment, TaskRewards};
pub use status::TaskStatus;
pub use task::{MAX_TITLE_CHARS, PersistedTaskData, Task, Urgency};
