//! Average Hash (aHash) implementation.
//!
//! aHash works by:
//! 1. Taking an 8x8 grayscale grid
//! 2. Computing the mean brightness of all 64 samples
//! 3. For each sample: if at least as bright as the mean, set bit to 1, else 0
//!
//! This is the fastest hash. It tolerates uniform scaling but not global
//! tone shifts.

use super::super::grid::PixelGrid;
use super::super::signature::{BitSignature, SignatureBuilder};
use super::super::traits::{ensure_shape, HashAlgorithm, HashVariant};
use crate::error::HashError;

/// Average Hash (aHash) implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct AverageHasher;

impl AverageHasher {
    /// Create a new aHash hasher
    pub fn new() -> Self {
        Self
    }
}

impl HashAlgorithm for AverageHasher {
    fn hash_grid(&self, grid: &PixelGrid) -> Result<BitSignature, HashError> {
        ensure_shape(HashVariant::Average, grid)?;

        let samples = grid.samples();
        let total: u32 = samples.iter().map(|&s| u32::from(s)).sum();
        let mean = f64::from(total) / samples.len() as f64;

        let mut builder = SignatureBuilder::new();
        for &sample in samples {
            builder.push(f64::from(sample) >= mean);
        }

        Ok(builder.finish())
    }

    fn variant(&self) -> HashVariant {
        HashVariant::Average
    }
}
