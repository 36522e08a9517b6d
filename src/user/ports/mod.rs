//! Port contracts for player persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by player services.

pub mod repository;

pub use repository::{
    InactivityCriteria, Page, UserRepository, UserRepositoryError, UserRepositoryResult,
};
