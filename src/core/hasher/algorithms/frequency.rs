//! Frequency Hash (pHash) implementation.
//!
//! pHash uses the Discrete Cosine Transform (DCT) to extract
//! frequency information from the image. This makes it more
//! robust to:
//! - Scaling
//! - Compression artifacts
//! - Mild brightness/contrast changes
//!
//! The 32x32 grid is transformed separably (rows, then columns) with an
//! unnormalised DCT-II. The top-left 8x8 block of low frequencies is then
//! compared against its mean or median, setting a bit for every
//! coefficient strictly below the threshold.

use super::super::grid::PixelGrid;
use super::super::signature::{BitSignature, SignatureBuilder};
use super::super::traits::{ensure_shape, FrequencyThreshold, HashAlgorithm, HashVariant};
use crate::error::HashError;
use std::f64::consts::PI;

/// Side of the input grid
const GRID: usize = 32;
/// Side of the retained low-frequency block
const LOW: usize = 8;

/// Frequency Hash (pHash) implementation using DCT
pub struct FrequencyHasher {
    threshold: FrequencyThreshold,
    /// `cosines[k * GRID + n] = cos(pi * (2n + 1) * k / (2 * GRID))`
    cosines: Vec<f64>,
}

impl FrequencyHasher {
    /// Create a new pHash hasher
    pub fn new(threshold: FrequencyThreshold) -> Self {
        let mut cosines = Vec::with_capacity(LOW * GRID);
        for k in 0..LOW {
            for n in 0..GRID {
                let angle = PI * (2 * n + 1) as f64 * k as f64 / (2 * GRID) as f64;
                cosines.push(angle.cos());
            }
        }
        Self { threshold, cosines }
    }

    /// The 8x8 low-frequency corner of the 2-D DCT, row-major.
    ///
    /// Only the first eight coefficients along each axis are ever read, so
    /// only those are computed.
    fn low_frequencies(&self, grid: &PixelGrid) -> [f64; LOW * LOW] {
        // Pass 1: along each row, keeping frequencies 0..LOW
        let mut rows = [[0.0f64; LOW]; GRID];
        for (y, row) in grid.rows().enumerate() {
            for (u, out) in rows[y].iter_mut().enumerate() {
                let basis = &self.cosines[u * GRID..(u + 1) * GRID];
                *out = row
                    .iter()
                    .zip(basis)
                    .map(|(&sample, &c)| f64::from(sample) * c)
                    .sum::<f64>()
                    * 2.0;
            }
        }

        // Pass 2: down each retained column
        let mut block = [0.0f64; LOW * LOW];
        for v in 0..LOW {
            let basis = &self.cosines[v * GRID..(v + 1) * GRID];
            for u in 0..LOW {
                block[v * LOW + u] = rows
                    .iter()
                    .zip(basis)
                    .map(|(row, &c)| row[u] * c)
                    .sum::<f64>()
                    * 2.0;
            }
        }

        block
    }

    fn cutoff(&self, block: &[f64; LOW * LOW]) -> f64 {
        match self.threshold {
            FrequencyThreshold::Mean => block.iter().sum::<f64>() / block.len() as f64,
            FrequencyThreshold::Median => {
                let mut sorted = *block;
                sorted.sort_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                (sorted[mid - 1] + sorted[mid]) / 2.0
            }
        }
    }
}

impl Default for FrequencyHasher {
    fn default() -> Self {
        Self::new(FrequencyThreshold::default())
    }
}

impl HashAlgorithm for FrequencyHasher {
    fn hash_grid(&self, grid: &PixelGrid) -> Result<BitSignature, HashError> {
        ensure_shape(HashVariant::Frequency, grid)?;

        let block = self.low_frequencies(grid);
        let cutoff = self.cutoff(&block);

        let mut builder = SignatureBuilder::new();
        for &coefficient in &block {
            builder.push(coefficient < cutoff);
        }

        Ok(builder.finish())
    }

    fn variant(&self) -> HashVariant {
        HashVariant::Frequency
    }
}
