//! The similarity tolerance: how far a candidate may drift from the reference.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance level on a 1-10 scale, mapping to the largest Hamming
/// distance a candidate may have and still be ranked.
///
/// Level `n` admits distances `0..=n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tolerance {
    level: u8,
}

impl Tolerance {
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 10;
    pub const DEFAULT_LEVEL: u8 = 10;

    /// Create a tolerance, rejecting levels outside 1-10
    pub fn new(level: u8) -> Result<Self, SearchError> {
        if (Self::MIN_LEVEL..=Self::MAX_LEVEL).contains(&level) {
            Ok(Self { level })
        } else {
            Err(SearchError::Config(format!(
                "similarity level {} is out of range ({}-{})",
                level,
                Self::MIN_LEVEL,
                Self::MAX_LEVEL
            )))
        }
    }

    /// Strictest setting (level 1)
    pub fn strict() -> Self {
        Self {
            level: Self::MIN_LEVEL,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Largest distance still admitted
    pub fn max_distance(&self) -> u32 {
        u32::from(self.level)
    }

    /// Whether a candidate at `distance` is close enough to be ranked
    pub fn admits(&self, distance: u32) -> bool {
        distance <= self.max_distance()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            level: Self::DEFAULT_LEVEL,
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {} (distance <= {})", self.level, self.max_distance())
    }
}
