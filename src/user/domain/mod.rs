//! Domain model for player progression.
//!
//! All operations here are pure mutations of the in-memory aggregate; the
//! current instant is always read through a [`mockable::Clock`].

mod attributes;
mod error;
mod ids;
mod rank;
mod user;

pub use attributes::{Attribute, Attributes};
pub use error::{ParseAttributeError, UserDomainError};
pub use ids::{ExternalAccountId, UserId};
pub use rank::Rank;
pub use user::{AdvisoryQuota, License, PersistedUserData, User, UserProfile, xp_required_for};
