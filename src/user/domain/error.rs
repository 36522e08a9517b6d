//! Error types for player rule violations.

use crate::error::DomainErrorKind;
use thiserror::Error;

/// Rule violations raised by the user aggregate and player services.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The player cannot cover a gold cost.
    #[error("insufficient gold: required {required}, available {available}")]
    InsufficientGold {
        /// Gold the operation needs.
        required: u64,
        /// Gold the player holds.
        available: u64,
    },

    /// The player cannot cover an energy cost.
    #[error("insufficient energy: required {required}, available {available}")]
    InsufficientEnergy {
        /// Energy the operation needs.
        required: u32,
        /// Energy the player holds.
        available: u32,
    },

    /// No advisory requests remain until the weekly reset.
    #[error("no advisory requests left")]
    NoAdvisoryRequests,

    /// The player's hunter license has lapsed.
    #[error("hunter license is inactive")]
    LicenseInactive,

    /// A player tried to raid themselves.
    #[error("cannot raid yourself")]
    CannotRaidSelf,

    /// The raid target has been active recently.
    #[error("player is still active")]
    PlayerNotInactive,
}

impl UserDomainError {
    /// Classifies the violation.
    #[must_use]
    pub const fn kind(&self) -> DomainErrorKind {
        match self {
            Self::InsufficientGold { .. } => DomainErrorKind::InsufficientGold,
            Self::InsufficientEnergy { .. } => DomainErrorKind::InsufficientEnergy,
            Self::NoAdvisoryRequests => DomainErrorKind::NoAdvisoryRequests,
            Self::LicenseInactive => DomainErrorKind::LicenseInactive,
            Self::CannotRaidSelf => DomainErrorKind::CannotRaidSelf,
            Self::PlayerNotInactive => DomainErrorKind::PlayerNotInactive,
        }
    }
}

/// Error returned while parsing an attribute name from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown attribute: {0}")]
pub struct ParseAttributeError(pub String);
