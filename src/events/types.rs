//! Event type definitions for progress reporting.

use crate::core::hasher::HashVariant;
use crate::core::search::SearchState;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted during a search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Search-level events
    Search(SearchEvent),
    /// Per-candidate events
    Candidate(CandidateEvent),
}

/// Events describing the search as a whole
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SearchEvent {
    /// The reference was hashed and scanning is about to begin
    Started {
        reference: PathBuf,
        variant: HashVariant,
        max_distance: u32,
        workers: usize,
    },
    /// The search moved to another state
    StateChanged { state: SearchState },
    /// A candidate identical to the reference was found; the search stops
    ExactMatch { path: PathBuf },
    /// Search completed
    Completed { summary: SearchSummary },
}

/// Events about individual candidates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CandidateEvent {
    /// A candidate was hashed and compared
    Checked(CandidateProgress),
    /// A candidate could not be decoded and was skipped
    Skipped { path: PathBuf, message: String },
}

/// Progress information for one compared candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProgress {
    /// 1-based discovery number of the candidate
    pub index: usize,
    /// Candidate path
    pub path: PathBuf,
    /// Hamming distance to the reference
    pub distance: u32,
}

/// Summary of a completed search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    /// Candidates handed out by discovery
    pub candidates_discovered: usize,
    /// Candidates successfully hashed and compared
    pub candidates_checked: usize,
    /// Candidates that failed to decode
    pub candidates_skipped: usize,
    /// Candidates whose distance was within tolerance
    pub within_tolerance: usize,
    /// Worker threads used (1 when sequential)
    pub workers: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
