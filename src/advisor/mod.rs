//! AI advisory collaborator.
//!
//! The game asks an external assessor to classify custom tasks, to answer
//! advisory chat turns and to suggest urgent calls. Every use case except
//! advisory chat has a local fallback, so [`DisabledAdvisor`] is a complete
//! deployment choice rather than a test double.

pub mod adapters;
mod domain;
mod ports;

pub use adapters::{DisabledAdvisor, ScriptedAdvisor};
pub use domain::{ChatMessage, ChatRole, TaskAnalysis, UrgentCallSuggestion};
#[cfg(test)]
pub use ports::MockAdvisor;
pub use ports::{Advisor, AdvisorError, AdvisorResult};
