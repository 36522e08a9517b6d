//! Reward economics attached to a task.

use crate::user::domain::Attribute;
use serde::{Deserialize, Serialize};

/// Rewards granted when a task is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRewards {
    /// Experience points.
    pub xp: u64,
    /// Gold.
    pub gold: u64,
    /// Amount added to the trained attribute.
    pub stat_boost: u32,
    /// Attribute the task trains.
    pub attribute: Attribute,
}

/// Scaling applied to rewards at completion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardScale {
    /// Rewards are granted as configured.
    Full,
    /// Experience and gold are halved, rounding down.
    Halved,
}

/// Classification of a task supplied by an external assessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssessment {
    /// Attribute the task trains.
    pub attribute: Attribute,
    /// Difficulty rating.
    pub difficulty: u32,
    /// Experience reward.
    pub xp_reward: u64,
    /// Gold reward.
    pub gold_reward: u64,
    /// Energy needed to start.
    pub energy_cost: u32,
}
