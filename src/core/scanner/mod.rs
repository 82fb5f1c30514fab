//! # Scanner Module
//!
//! Discovers candidate images under the gallery paths.
//!
//! Candidates are produced lazily: the walk advances only as fast as the
//! search consumes paths, so a huge gallery is never held in memory.
//! Files are recognised as images by their magic bytes, not their
//! extension. Hidden entries (names starting with `.`) and anything that
//! is not a regular file are skipped.
//!
//! ## Example
//! ```rust,ignore
//! use similar_search::core::scanner::{CandidateSource, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(vec!["/Users/me/Pictures".into()], ScanConfig::default());
//! for path in scanner.candidates()? {
//!     println!("{}", path.display());
//! }
//! ```

mod filter;
mod walker;

pub use filter::{is_hidden_name, is_image, ImageFilter};
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use std::path::PathBuf;

/// A lazy, finite stream of candidate paths
pub type Candidates<'a> = Box<dyn Iterator<Item = PathBuf> + Send + 'a>;

/// Source of candidate image paths
///
/// Implement this trait to feed the search from somewhere other than the
/// filesystem (e.g., for testing).
pub trait CandidateSource: Send + Sync {
    /// Start a fresh pass over the candidates.
    ///
    /// Errors here are fatal to the search (e.g., a missing gallery root);
    /// problems with individual entries are logged and skipped instead.
    fn candidates(&self) -> Result<Candidates<'_>, ScanError>;
}

/// A fixed list of paths, yielded in order without any filtering
impl CandidateSource for Vec<PathBuf> {
    fn candidates(&self) -> Result<Candidates<'_>, ScanError> {
        Ok(Box::new(self.iter().cloned()))
    }
}
