//! User aggregate root: progression, resources, license and advisory quota.

use super::{Attribute, Attributes, ExternalAccountId, Rank, UserDomainError, UserId};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const BASE_LEVEL_XP: u64 = 100;
const LEVEL_UP_MAX_ENERGY_BONUS: u32 = 10;
const LEVEL_UP_GOLD_PER_LEVEL: u64 = 10;
const STARTING_GOLD: u64 = 100;
const STARTING_ENERGY: u32 = 100;
const LICENSE_PERIOD_DAYS: i64 = 7;
const ADVISORY_WEEKLY_REQUESTS: u32 = 5;
const ADVISORY_RESET_DAYS: i64 = 7;
const INACTIVITY_THRESHOLD_DAYS: i64 = 3;

/// Display fields mirrored from the external account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account handle.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Avatar URL, empty when the account has none.
    pub photo_url: String,
}

impl UserProfile {
    /// Creates a profile from display fields.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        photo_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            photo_url: photo_url.into(),
        }
    }
}

/// Rolling hunter license window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// Whether the license has been activated and not revoked.
    pub active: bool,
    /// End of the current validity window.
    pub expires_at: DateTime<Utc>,
    /// Instant of the most recent renewal.
    pub last_checked_at: DateTime<Utc>,
}

impl License {
    /// Returns whether the license is usable at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.active && now < self.expires_at
    }
}

/// Weekly advisory chat allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryQuota {
    /// Requests left in the current window.
    pub remaining: u32,
    /// Instant after which an exhausted quota is replenished.
    pub resets_at: DateTime<Utc>,
}

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    external_id: ExternalAccountId,
    profile: UserProfile,
    level: u32,
    xp: u64,
    xp_to_next_level: u64,
    gold: u64,
    energy: u32,
    max_energy: u32,
    attributes: Attributes,
    license: License,
    advisory: AdvisoryQuota,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted external account identifier.
    pub external_id: ExternalAccountId,
    /// Persisted display fields.
    pub profile: UserProfile,
    /// Persisted level.
    pub level: u32,
    /// Persisted experience within the current level.
    pub xp: u64,
    /// Persisted gold balance.
    pub gold: u64,
    /// Persisted energy.
    pub energy: u32,
    /// Persisted energy ceiling.
    pub max_energy: u32,
    /// Persisted attribute counters.
    pub attributes: Attributes,
    /// Persisted license window.
    pub license: License,
    /// Persisted advisory quota.
    pub advisory: AdvisoryQuota,
    /// Persisted registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last activity timestamp.
    pub last_active_at: DateTime<Utc>,
}

/// Experience needed to advance past `level`.
#[expect(
    clippy::integer_division,
    reason = "level thresholds are defined with truncating division"
)]
#[must_use]
pub fn xp_required_for(level: u32) -> u64 {
    let squared = u64::from(level).saturating_mul(u64::from(level));
    BASE_LEVEL_XP.saturating_mul(squared) / 2
}

impl User {
    /// Registers a new player with starting resources, a fresh seven-day
    /// license and a full advisory quota.
    #[must_use]
    pub fn register(
        external_id: ExternalAccountId,
        profile: UserProfile,
        clock: &impl Clock,
    ) -> Self {
        let now = clock.utc();
        let mut user = Self {
            id: UserId::new(),
            external_id,
            profile,
            level: 1,
            xp: 0,
            xp_to_next_level: xp_required_for(1),
            gold: STARTING_GOLD,
            energy: STARTING_ENERGY,
            max_energy: STARTING_ENERGY,
            attributes: Attributes::STARTING,
            license: License {
                active: true,
                expires_at: now,
                last_checked_at: now,
            },
            advisory: AdvisoryQuota {
                remaining: ADVISORY_WEEKLY_REQUESTS,
                resets_at: now + TimeDelta::days(ADVISORY_RESET_DAYS),
            },
            created_at: now,
            last_active_at: now,
        };
        user.renew_license(clock);
        user
    }

    /// Reconstructs a user from persisted storage. The level threshold is
    /// recomputed rather than trusted.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            external_id: data.external_id,
            profile: data.profile,
            level: data.level.max(1),
            xp: data.xp,
            xp_to_next_level: xp_required_for(data.level.max(1)),
            gold: data.gold,
            energy: data.energy.min(data.max_energy),
            max_energy: data.max_energy,
            attributes: data.attributes,
            license: data.license,
            advisory: data.advisory,
            created_at: data.created_at,
            last_active_at: data.last_active_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the external account identifier.
    #[must_use]
    pub const fn external_id(&self) -> ExternalAccountId {
        self.external_id
    }

    /// Returns the display fields.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the current level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns experience accumulated within the current level.
    #[must_use]
    pub const fn xp(&self) -> u64 {
        self.xp
    }

    /// Returns the experience threshold for the next level.
    #[must_use]
    pub const fn xp_to_next_level(&self) -> u64 {
        self.xp_to_next_level
    }

    /// Returns the gold balance.
    #[must_use]
    pub const fn gold(&self) -> u64 {
        self.gold
    }

    /// Returns the current energy.
    #[must_use]
    pub const fn energy(&self) -> u32 {
        self.energy
    }

    /// Returns the energy ceiling.
    #[must_use]
    pub const fn max_energy(&self) -> u32 {
        self.max_energy
    }

    /// Returns the attribute counters.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the license window.
    #[must_use]
    pub const fn license(&self) -> &License {
        &self.license
    }

    /// Returns the advisory quota as last stored.
    #[must_use]
    pub const fn advisory(&self) -> &AdvisoryQuota {
        &self.advisory
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last activity timestamp.
    #[must_use]
    pub const fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }

    /// Recomputes the experience threshold for the current level.
    #[must_use]
    pub fn calculate_xp_to_next_level(&self) -> u64 {
        xp_required_for(self.level)
    }

    /// Adds experience and returns whether the player levelled up.
    ///
    /// At most one level is gained per call: when a single grant crosses
    /// several thresholds the surplus stays in `xp` and is only converted by
    /// a later grant.
    pub fn add_xp(&mut self, amount: u64) -> bool {
        self.xp = self.xp.saturating_add(amount);
        self.xp_to_next_level = self.calculate_xp_to_next_level();

        if self.xp >= self.xp_to_next_level {
            self.level_up();
            return true;
        }
        false
    }

    fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.xp = self.xp.saturating_sub(self.xp_to_next_level);
        self.xp_to_next_level = self.calculate_xp_to_next_level();

        self.max_energy = self.max_energy.saturating_add(LEVEL_UP_MAX_ENERGY_BONUS);
        self.energy = self.max_energy;
        self.gold = self
            .gold
            .saturating_add(u64::from(self.level).saturating_mul(LEVEL_UP_GOLD_PER_LEVEL));
    }

    /// Adjusts gold by a signed amount. The balance never drops below zero.
    pub const fn add_gold(&mut self, amount: i64) {
        let magnitude = amount.unsigned_abs();
        self.gold = if amount >= 0 {
            self.gold.saturating_add(magnitude)
        } else {
            self.gold.saturating_sub(magnitude)
        };
    }

    /// Debits gold.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InsufficientGold`] and leaves the balance
    /// untouched when `amount` exceeds it.
    pub const fn spend_gold(&mut self, amount: u64) -> Result<(), UserDomainError> {
        if amount > self.gold {
            return Err(UserDomainError::InsufficientGold {
                required: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    /// Returns whether the player can pay `required` energy.
    #[must_use]
    pub const fn has_enough_energy(&self, required: u32) -> bool {
        self.energy >= required
    }

    /// Debits energy.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InsufficientEnergy`] when `amount`
    /// exceeds the current energy.
    pub const fn spend_energy(&mut self, amount: u32) -> Result<(), UserDomainError> {
        if !self.has_enough_energy(amount) {
            return Err(UserDomainError::InsufficientEnergy {
                required: amount,
                available: self.energy,
            });
        }
        self.energy -= amount;
        Ok(())
    }

    /// Restores energy up to the ceiling.
    pub fn restore_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_add(amount).min(self.max_energy);
    }

    /// Returns whether the license is valid right now.
    #[must_use]
    pub fn is_license_valid(&self, clock: &impl Clock) -> bool {
        self.license.is_valid_at(clock.utc())
    }

    /// Activates the license for seven days from now.
    pub fn renew_license(&mut self, clock: &impl Clock) {
        let now = clock.utc();
        self.license = License {
            active: true,
            expires_at: now + TimeDelta::days(LICENSE_PERIOD_DAYS),
            last_checked_at: now,
        };
    }

    /// Deactivates the license regardless of its expiry.
    pub const fn revoke_license(&mut self) {
        self.license.active = false;
    }

    /// Returns whether an advisory request is available, replenishing an
    /// exhausted quota once its reset instant has passed.
    pub fn can_use_advisory(&mut self, clock: &impl Clock) -> bool {
        let now = clock.utc();
        if self.advisory.remaining == 0 && now > self.advisory.resets_at {
            self.advisory = AdvisoryQuota {
                remaining: ADVISORY_WEEKLY_REQUESTS,
                resets_at: now + TimeDelta::days(ADVISORY_RESET_DAYS),
            };
        }
        self.advisory.remaining > 0
    }

    /// Consumes one advisory request.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::NoAdvisoryRequests`] when the quota is
    /// exhausted and not yet due for reset.
    pub fn use_advisory_request(&mut self, clock: &impl Clock) -> Result<(), UserDomainError> {
        if !self.can_use_advisory(clock) {
            return Err(UserDomainError::NoAdvisoryRequests);
        }
        self.advisory.remaining -= 1;
        Ok(())
    }

    /// Returns a previously consumed advisory request.
    pub const fn refund_advisory_request(&mut self) {
        self.advisory.remaining = self.advisory.remaining.saturating_add(1);
    }

    /// Buys one extra advisory request for `cost` gold.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InsufficientGold`] when the player cannot
    /// pay.
    pub fn buy_advisory_request(&mut self, cost: u64) -> Result<(), UserDomainError> {
        self.spend_gold(cost)?;
        self.refund_advisory_request();
        Ok(())
    }

    /// Raises the counter for `attribute`.
    pub fn increase_attribute(&mut self, attribute: Attribute, amount: u32) {
        self.attributes.increase(attribute, amount);
    }

    /// Raises the attribute named `name`. Unknown names are ignored; returns
    /// whether a counter changed.
    pub fn increase_attribute_by_name(&mut self, name: &str, amount: u32) -> bool {
        Attribute::try_from(name).is_ok_and(|attribute| {
            self.increase_attribute(attribute, amount);
            true
        })
    }

    /// Returns the rank for the current level.
    #[must_use]
    pub const fn rank(&self) -> Rank {
        Rank::for_level(self.level)
    }

    /// Returns whether the player has been away for more than three days.
    #[must_use]
    pub fn is_inactive(&self, clock: &impl Clock) -> bool {
        clock.utc() - self.last_active_at > TimeDelta::days(INACTIVITY_THRESHOLD_DAYS)
    }

    /// Marks the player as active now.
    pub fn record_activity(&mut self, clock: &impl Clock) {
        self.last_active_at = clock.utc();
    }

    pub(crate) const fn set_last_active_at(&mut self, at: DateTime<Utc>) {
        self.last_active_at = at;
    }

    /// Replaces the display fields and marks the player as active.
    pub fn update_profile(&mut self, profile: UserProfile, clock: &impl Clock) {
        self.profile = profile;
        self.record_activity(clock);
    }

    /// Returns the instant before which a player counts as inactive.
    #[must_use]
    pub fn inactivity_cutoff(clock: &impl Clock) -> DateTime<Utc> {
        clock.utc() - TimeDelta::days(INACTIVITY_THRESHOLD_DAYS)
    }
}
