//! Player attributes and the task categories that train them.

use super::ParseAttributeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four trainable attributes. Every task belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Physical tasks.
    Strength,
    /// Speed and coordination tasks.
    Agility,
    /// Study and problem-solving tasks.
    Intelligence,
    /// Reflection and mindfulness tasks.
    Insight,
}

impl Attribute {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Agility => "agility",
            Self::Intelligence => "intelligence",
            Self::Insight => "insight",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Attribute {
    type Error = ParseAttributeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "strength" => Ok(Self::Strength),
            "agility" => Ok(Self::Agility),
            "intelligence" => Ok(Self::Intelligence),
            "insight" => Ok(Self::Insight),
            _ => Err(ParseAttributeError(value.to_owned())),
        }
    }
}

/// Attribute counters, one per [`Attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Strength counter.
    pub strength: u32,
    /// Agility counter.
    pub agility: u32,
    /// Intelligence counter.
    pub intelligence: u32,
    /// Insight counter.
    pub insight: u32,
}

impl Attributes {
    /// Attribute values every new player starts with.
    pub const STARTING: Self = Self {
        strength: 1,
        agility: 1,
        intelligence: 1,
        insight: 1,
    };

    /// Returns the counter for `attribute`.
    #[must_use]
    pub const fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Intelligence => self.intelligence,
            Attribute::Insight => self.insight,
        }
    }

    pub(crate) fn increase(&mut self, attribute: Attribute, amount: u32) {
        let counter = match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Insight => &mut self.insight,
        };
        *counter = counter.saturating_add(amount);
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::STARTING
    }
}
