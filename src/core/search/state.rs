//! Lifecycle of a single search.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a search is in its lifecycle.
///
/// ```text
/// Idle -> Scanning -> ExactMatch -> Done
///                  \-> Exhausted  -/
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    /// Configured, reference not yet hashed
    Idle,
    /// Candidates are being hashed and compared
    Scanning,
    /// A zero-distance candidate stopped the scan early
    ExactMatch,
    /// Every candidate was examined
    Exhausted,
    /// Results drained; the search is over
    Done,
}

impl SearchState {
    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_advance_to(self, next: SearchState) -> bool {
        matches!(
            (self, next),
            (SearchState::Idle, SearchState::Scanning)
                | (SearchState::Scanning, SearchState::ExactMatch)
                | (SearchState::Scanning, SearchState::Exhausted)
                | (SearchState::ExactMatch, SearchState::Done)
                | (SearchState::Exhausted, SearchState::Done)
        )
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchState::Idle => "idle",
            SearchState::Scanning => "scanning",
            SearchState::ExactMatch => "exact match",
            SearchState::Exhausted => "exhausted",
            SearchState::Done => "done",
        };
        f.write_str(name)
    }
}
