//! Classification of domain rule violations.
//!
//! Every service error can be reduced to a [`DomainErrorKind`] when it is an
//! expected outcome of normal use. Transport layers match on the kind to
//! render specific messages; errors without a kind are infrastructure
//! failures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of domain rule violations surfaced by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainErrorKind {
    /// The user cannot cover a gold cost.
    InsufficientGold,
    /// The user cannot cover an energy cost.
    InsufficientEnergy,
    /// The weekly advisory quota is exhausted.
    NoAdvisoryRequests,
    /// The task is not in a state that allows the requested action.
    TaskNotActive,
    /// The task has not been started.
    TaskNotInProgress,
    /// The urgent task deadline has passed.
    TaskExpired,
    /// The caller does not own the task.
    Unauthorized,
    /// A player attempted to raid themselves.
    CannotRaidSelf,
    /// The raid target has been active recently.
    PlayerNotInactive,
    /// The acting player's license has lapsed.
    LicenseInactive,
    /// The referenced user or task does not exist.
    NotFound,
    /// Request input failed validation.
    InvalidInput,
}

impl DomainErrorKind {
    /// Returns a stable machine-readable code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InsufficientGold => "insufficient_gold",
            Self::InsufficientEnergy => "insufficient_energy",
            Self::NoAdvisoryRequests => "no_advisory_requests",
            Self::TaskNotActive => "task_not_active",
            Self::TaskNotInProgress => "task_not_in_progress",
            Self::TaskExpired => "task_expired",
            Self::Unauthorized => "unauthorized",
            Self::CannotRaidSelf => "cannot_raid_self",
            Self::PlayerNotInactive => "player_not_inactive",
            Self::LicenseInactive => "license_inactive",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for DomainErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
