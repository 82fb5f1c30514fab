//! # Comparator Module
//!
//! Decides which candidates are close enough to the reference and keeps
//! the best of them.
//!
//! ## How It Works
//! 1. Compute the Hamming distance between reference and candidate
//! 2. Discard the candidate if the [`Tolerance`] does not admit it
//! 3. Offer it to the [`TopKSelector`], which keeps the K closest
//!
//! ## Distance Classes
//! | Distance | Classification |
//! |----------|---------------|
//! | 0        | Exact match   |
//! | 1-4      | Near-exact    |
//! | 5-10     | Similar       |
//! | 11+      | Maybe similar |

mod selector;
mod tolerance;

pub use selector::{Offer, RankedMatch, RankedResult, TopKSelector, DEFAULT_TOP_K};
pub use tolerance::Tolerance;

use serde::{Deserialize, Serialize};

/// Classification of match types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// Distance = 0, identical perceptual content
    Exact,
    /// Distance 1-4, virtually identical
    NearExact,
    /// Distance 5-10, visibly the same picture
    Similar,
    /// Distance 11+, possibly related
    MaybeSimilar,
}

impl MatchType {
    /// Classify based on Hamming distance
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0 => MatchType::Exact,
            1..=4 => MatchType::NearExact,
            5..=10 => MatchType::Similar,
            _ => MatchType::MaybeSimilar,
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "Exact Match"),
            MatchType::NearExact => write!(f, "Near-Exact Match"),
            MatchType::Similar => write!(f, "Similar"),
            MatchType::MaybeSimilar => write!(f, "Maybe Similar"),
        }
    }
}
