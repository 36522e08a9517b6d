//! Dojo: progression and economy engine for a gamified task tracker.
//!
//! Players complete real-world tasks to earn experience, gold and attribute
//! growth. Urgent calls add deadlines and decline penalties, a rolling
//! license gates full rewards, an advisory quota limits AI chat, and raids
//! let active players take gold from inactive ones.
//!
//! # Architecture
//!
//! Dojo follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, AI, etc.)
//!
//! # Modules
//!
//! - [`user`]: Player progression, resources, onboarding and raids
//! - [`task`]: Task lifecycle, rewards and the urgent-call expiry sweep
//! - [`advisor`]: AI classification and chat collaborator
//! - [`store`]: Atomic commits spanning users and tasks
//! - [`error`]: Classification of domain rule violations

pub mod advisor;
pub mod clock;
pub mod config;
pub mod error;
pub mod store;
pub mod task;
pub mod user;
