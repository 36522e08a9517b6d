//! Application services for task lifecycle orchestration.

mod lifecycle;
mod sweep;

pub use lifecycle::{
    CreateCustomTaskRequest, CreateUrgentCallRequest, TaskCompletion, TaskLifecycleService,
    TaskServiceError, TaskServiceResult,
};
pub use sweep::ExpirySweepService;
