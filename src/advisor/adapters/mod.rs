//! Advisor implementations.

mod disabled;
mod scripted;

pub use disabled::DisabledAdvisor;
pub use scripted::ScriptedAdvisor;
