//! Hunter rank derived from level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse tier label for a player's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Levels 1 to 9.
    E,
    /// Levels 10 to 19.
    D,
    /// Levels 20 to 29.
    C,
    /// Levels 30 to 39.
    B,
    /// Levels 40 to 49.
    A,
    /// Level 50 and above.
    S,
}

impl Rank {
    /// Maps a level onto its rank.
    #[must_use]
    pub const fn for_level(level: u32) -> Self {
        match level {
            50.. => Self::S,
            40..=49 => Self::A,
            30..=39 => Self::B,
            20..=29 => Self::C,
            10..=19 => Self::D,
            _ => Self::E,
        }
    }

    /// Returns the single-letter label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::E => "E",
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
            Self::S => "S",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
