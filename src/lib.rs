//! # Similar Search
//!
//! Finds the images in a gallery that look most like a reference image.
//!
//! ## How It Works
//! - Every image is reduced to a 64-bit perceptual signature (aHash, dHash
//!   or pHash)
//! - Similarity is the Hamming distance between signatures
//! - Only the K closest candidates within the tolerance are kept, and an
//!   identical candidate ends the search on the spot
//!
//! ## Architecture
//! - `core` - The search engine (UI-agnostic)
//! - `events` - Event-driven progress reporting
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SearchError};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the library.
///
/// This should be called by the application entry point. `RUST_LOG`
/// takes precedence; otherwise only warnings are shown, or debug output
/// when `verbose` is set. Logs go to stderr so stdout carries only the
/// report. Calling it twice is harmless.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
