//! Application services for player onboarding, advisory chat and raids.

mod advisory;
mod player;
mod raid;

pub use player::{PlayerService, PlayerServiceError, PlayerServiceResult, RegisterUserRequest};
pub use raid::{RaidOutcome, RaidRequest};
