//! How often a task recurs.

use super::ParseTaskFrequencyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task recurrence kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFrequency {
    /// Issued every day; rewards are never reduced by an inactive license.
    Daily,
    /// Created by the player for a gold fee.
    Custom,
    /// Time-boxed call with boosted rewards and a decline penalty.
    Urgent,
}

impl TaskFrequency {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Custom => "custom",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskFrequency {
    type Error = ParseTaskFrequencyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "daily" => Ok(Self::Daily),
            "custom" => Ok(Self::Custom),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseTaskFrequencyError(value.to_owned())),
        }
    }
}
