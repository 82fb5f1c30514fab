//! # Hasher Module
//!
//! Reduces images to 64-bit perceptual signatures.
//!
//! ## Supported Variants
//! - **aHash (Average Hash)** - 8x8 grid, each sample against the mean
//! - **dHash (Difference Hash)** - 9x8 grid, each sample against its right neighbour
//! - **pHash (Frequency Hash)** - 32x32 grid, low DCT frequencies against mean or median
//!
//! ## How It Works
//! 1. Decode the image (zune-jpeg for JPEG, image crate otherwise)
//! 2. Convert to grayscale and resample to the variant's grid (nearest neighbour)
//! 3. Compute one bit per comparison, packed MSB-first
//! 4. Compare signatures using Hamming distance
//!
//! ## Example
//! ```rust,ignore
//! use similar_search::core::hasher::{HasherConfig, HashVariant, ImageGridDecoder};
//!
//! let hasher = HasherConfig::new()
//!     .variant(HashVariant::Difference)
//!     .build();
//!
//! let signature = hasher.hash_file(&path, &ImageGridDecoder::new())?;
//! ```

mod algorithms;
mod decode;
pub mod fast_decode;
pub mod fast_resize;
mod grid;
pub mod mmap_read;
mod signature;
mod traits;

pub use algorithms::{AverageHasher, DifferenceHasher, FrequencyHasher};
pub use decode::{GridDecoder, ImageGridDecoder};
pub use grid::{GridShape, PixelGrid};
pub use signature::{distance, similarity_percent, BitSignature, SIGNATURE_BITS};
pub use traits::{FrequencyThreshold, HashAlgorithm, HashVariant};

use crate::error::HashError;

/// Configuration builder for hashers
#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// Variant to use
    variant: HashVariant,
    /// Threshold rule for the frequency variant
    frequency_threshold: FrequencyThreshold,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults
    pub fn new() -> Self {
        Self {
            variant: HashVariant::Frequency,
            frequency_threshold: FrequencyThreshold::Mean,
        }
    }

    /// Set the hash variant
    pub fn variant(mut self, variant: HashVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the threshold rule used by the frequency variant.
    ///
    /// Ignored by the other variants.
    pub fn frequency_threshold(mut self, threshold: FrequencyThreshold) -> Self {
        self.frequency_threshold = threshold;
        self
    }

    /// Build the hasher
    pub fn build(self) -> Box<dyn HashAlgorithm> {
        match self.variant {
            HashVariant::Average => Box::new(AverageHasher::new()),
            HashVariant::Difference => Box::new(DifferenceHasher::new()),
            HashVariant::Frequency => Box::new(FrequencyHasher::new(self.frequency_threshold)),
        }
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash an already-decoded grid with the default settings for `variant`.
pub fn compute(grid: &PixelGrid, variant: HashVariant) -> Result<BitSignature, HashError> {
    HasherConfig::new().variant(variant).build().hash_grid(grid)
}
