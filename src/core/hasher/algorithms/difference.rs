//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Taking a 9x8 grayscale grid (one extra column)
//! 2. Comparing each sample to the one on its right
//! 3. If the left sample is at least as bright, set bit to 1, else 0
//!
//! This captures the relative gradient of brightness changes and is
//! unaffected by a uniform brightness shift.

use super::super::grid::PixelGrid;
use super::super::signature::{BitSignature, SignatureBuilder};
use super::super::traits::{ensure_shape, HashAlgorithm, HashVariant};
use crate::error::HashError;

/// Difference Hash (dHash) implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct DifferenceHasher;

impl DifferenceHasher {
    /// Create a new dHash hasher
    pub fn new() -> Self {
        Self
    }
}

impl HashAlgorithm for DifferenceHasher {
    fn hash_grid(&self, grid: &PixelGrid) -> Result<BitSignature, HashError> {
        ensure_shape(HashVariant::Difference, grid)?;

        let mut builder = SignatureBuilder::new();
        for row in grid.rows() {
            for pair in row.windows(2) {
                builder.push(pair[0] >= pair[1]);
            }
        }

        Ok(builder.finish())
    }

    fn variant(&self) -> HashVariant {
        HashVariant::Difference
    }
}
