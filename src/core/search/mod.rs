//! # Search Module
//!
//! Runs one similarity search: hash the reference, stream the gallery
//! through the hasher, keep the closest candidates.
//!
//! ## Lifecycle
//! `Idle -> Scanning -> (ExactMatch | Exhausted) -> Done`
//!
//! A candidate at distance 0 is the best possible answer, so it ends the
//! scan immediately and becomes the only result.
//!
//! ## Execution Modes
//! - **Sequential** - deterministic; ties keep discovery order
//! - **Parallel** - one producer, N workers, one aggregator owning the
//!   selector; ties keep the order the aggregator saw them in, which can
//!   vary between runs
//!
//! ## Example
//! ```rust,ignore
//! use similar_search::core::search::{ExecutionMode, SearchEngine};
//! use similar_search::core::hasher::HashVariant;
//!
//! let engine = SearchEngine::builder()
//!     .variant(HashVariant::Difference)
//!     .mode(ExecutionMode::Parallel { workers: Some(8) })
//!     .build()?;
//!
//! let outcome = engine.search(&reference, &gallery)?;
//! for m in &outcome.result {
//!     println!("{} ({:.1}%)", m.path.display(), m.similarity_percent());
//! }
//! ```

pub mod cancel;
mod engine;
mod parallel;
mod probe;
mod state;
#[cfg(test)]
mod test_support;

pub use engine::{
    ExecutionMode, SearchConfig, SearchEngine, SearchEngineBuilder, FALLBACK_WORKERS,
};
pub use state::SearchState;

use crate::core::comparator::RankedResult;
use crate::events::SearchSummary;

/// Everything a finished search produced
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The ranked matches, most similar first
    pub result: RankedResult,
    /// Whether the scan stopped on an exact match or ran out of candidates
    pub ended_with: SearchState,
    /// Counters and timing
    pub summary: SearchSummary,
}

impl SearchOutcome {
    pub fn found_exact_match(&self) -> bool {
        self.ended_with == SearchState::ExactMatch
    }
}
