//! Trait definitions for perceptual hashing.

use super::decode::GridDecoder;
use super::grid::{GridShape, PixelGrid};
use super::signature::BitSignature;
use crate::error::HashError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Available hash variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashVariant {
    /// Average Hash (aHash) - each pixel against the mean brightness
    Average,
    /// Difference Hash (dHash) - each pixel against its right neighbour
    Difference,
    /// Frequency Hash (pHash) - low DCT frequencies against their mean or median
    Frequency,
}

impl HashVariant {
    /// The grid the decoder must produce for this variant
    pub const fn grid_shape(self) -> GridShape {
        match self {
            HashVariant::Average => GridShape::new(8, 8),
            HashVariant::Difference => GridShape::new(9, 8),
            HashVariant::Frequency => GridShape::new(32, 32),
        }
    }
}

impl std::fmt::Display for HashVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashVariant::Average => write!(f, "aHash"),
            HashVariant::Difference => write!(f, "dHash"),
            HashVariant::Frequency => write!(f, "pHash"),
        }
    }
}

/// How the frequency hash picks the value each coefficient is compared to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyThreshold {
    /// Arithmetic mean of the 64 low-frequency coefficients
    #[default]
    Mean,
    /// Median of the 64 low-frequency coefficients (sets exactly half the bits
    /// when the coefficients are distinct)
    Median,
}

/// Trait for hash algorithm implementations
pub trait HashAlgorithm: Send + Sync {
    /// Reduce a grid of the variant's shape to a signature.
    ///
    /// Fails with [`HashError::InvalidInput`] when the grid has any other shape.
    fn hash_grid(&self, grid: &PixelGrid) -> Result<BitSignature, HashError>;

    /// Get the variant
    fn variant(&self) -> HashVariant;

    /// Decode `path` into the right grid shape and hash it
    fn hash_file(
        &self,
        path: &Path,
        decoder: &dyn GridDecoder,
    ) -> Result<BitSignature, HashError> {
        let grid = decoder.decode(path, self.variant().grid_shape())?;
        self.hash_grid(&grid)
    }
}

/// Reject grids whose shape does not match what `variant` consumes
pub(crate) fn ensure_shape(variant: HashVariant, grid: &PixelGrid) -> Result<(), HashError> {
    let expected = variant.grid_shape();
    if grid.shape() == expected {
        Ok(())
    } else {
        Err(HashError::InvalidInput {
            variant,
            expected,
            actual: grid.shape(),
        })
    }
}
