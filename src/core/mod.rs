//! # Core Module
//!
//! The UI-agnostic similarity search engine.
//!
//! ## Modules
//! - `scanner` - Discovers candidate images under the gallery paths
//! - `hasher` - Reduces images to 64-bit perceptual signatures
//! - `comparator` - Tolerance policy and top-K selection
//! - `search` - Orchestrates a search, sequentially or on a worker pool
//! - `reporter` - Renders the ranking as text or JSON

pub mod comparator;
pub mod hasher;
pub mod reporter;
pub mod scanner;
pub mod search;

// Re-export commonly used types
pub use comparator::{MatchType, RankedMatch, RankedResult, Tolerance};
pub use hasher::{BitSignature, HashVariant};
pub use search::{ExecutionMode, SearchEngine, SearchOutcome, SearchState};
