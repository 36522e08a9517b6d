//! Raids against inactive players.

use super::player::{PlayerService, PlayerServiceResult};
use crate::advisor::Advisor;
use crate::store::{Changeset, GameStore};
use crate::user::{
    domain::{Rank, User, UserDomainError, UserId},
    ports::{InactivityCriteria, UserRepository},
};
use mockable::Clock;
use tracing::info;

const MIN_LOOT: u64 = 10;
const LOOT_SHARE_DIVISOR: u64 = 5;
const XP_PER_TARGET_LEVEL: u64 = 5;
const TARGET_MIN_GOLD_EXCLUSIVE: u64 = 10;

/// Raid parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaidRequest {
    /// Raiding player.
    pub attacker_id: UserId,
    /// Raided player.
    pub target_id: UserId,
    /// Gold the attacker pays up front.
    pub cost: u64,
}

/// Result of a successful raid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidOutcome {
    /// Gold credited to the attacker.
    pub gold_looted: u64,
    /// Experience credited to the attacker.
    pub xp_gained: u64,
    /// Target's display name.
    pub target_name: String,
    /// Target's rank.
    pub target_rank: Rank,
}

/// Gold taken from a target holding `target_gold`: a fifth of it, but
/// never less than the minimum.
#[expect(clippy::integer_division, reason = "loot share rounds down")]
fn loot_for(target_gold: u64) -> u64 {
    (target_gold / LOOT_SHARE_DIVISOR).max(MIN_LOOT)
}

impl<S, A, C> PlayerService<S, A, C>
where
    S: GameStore,
    A: Advisor,
    C: Clock + Send + Sync,
{
    /// Raids an inactive player.
    ///
    /// The attacker always receives the full loot, even when the target
    /// holds less; the target's balance stops at zero.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::CannotRaidSelf`],
    /// [`UserDomainError::PlayerNotInactive`],
    /// [`UserDomainError::LicenseInactive`] or
    /// [`UserDomainError::InsufficientGold`]; nothing is persisted then.
    pub async fn raid_inactive_player(&self, request: RaidRequest) -> PlayerServiceResult<RaidOutcome> {
        let mut attacker = self.load_user(request.attacker_id).await?;
        let mut target = self.load_user(request.target_id).await?;

        if attacker.id() == target.id() {
            return Err(UserDomainError::CannotRaidSelf.into());
        }
        if !target.is_inactive(&*self.clock) {
            return Err(UserDomainError::PlayerNotInactive.into());
        }
        if !attacker.is_license_valid(&*self.clock) {
            return Err(UserDomainError::LicenseInactive.into());
        }
        attacker.spend_gold(request.cost)?;

        let loot = loot_for(target.gold());
        target.add_gold(0_i64.saturating_sub_unsigned(loot));
        attacker.add_gold(0_i64.saturating_add_unsigned(loot));
        let xp_gained = u64::from(target.level()).saturating_mul(XP_PER_TARGET_LEVEL);
        let leveled_up = attacker.add_xp(xp_gained);

        let outcome = RaidOutcome {
            gold_looted: loot,
            xp_gained,
            target_name: target.profile().username.clone(),
            target_rank: target.rank(),
        };
        self.store
            .commit(Changeset::new().with_user(attacker).with_user(target))
            .await?;
        info!(
            attacker_id = %request.attacker_id,
            target_id = %request.target_id,
            loot,
            xp_gained,
            leveled_up,
            "raid completed"
        );
        Ok(outcome)
    }

    /// Lists players that can be raided right now, richest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::PlayerServiceError::Repository`] when the lookup
    /// fails.
    pub async fn raid_targets(&self, limit: usize) -> PlayerServiceResult<Vec<User>> {
        let criteria = InactivityCriteria {
            active_before: User::inactivity_cutoff(&*self.clock),
            min_gold_exclusive: TARGET_MIN_GOLD_EXCLUSIVE,
            limit,
        };
        Ok(self.store.users().find_inactive(criteria).await?)
    }
}
