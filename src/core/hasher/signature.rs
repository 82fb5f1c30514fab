//! The 64-bit perceptual signature and its distance metric.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of meaningful bits in every signature, whatever the variant.
pub const SIGNATURE_BITS: u32 = 64;

/// A fixed-width perceptual hash.
///
/// Each bit records one comparison made by the hashing procedure, packed
/// most-significant-bit first. Two signatures are only comparable when
/// they were produced by the same [`HashVariant`](super::HashVariant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BitSignature(u64);

impl BitSignature {
    /// Wrap raw bits
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// The raw bits
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Hamming distance to another signature, in `0..=64`.
    pub fn distance(self, other: BitSignature) -> u32 {
        distance(self, other)
    }

    /// Hexadecimal rendering, always 16 digits
    pub fn to_hex(self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for BitSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hamming distance between two signatures.
///
/// `count_ones` lowers to a single population-count instruction (or a
/// branch-free SWAR reduction where none exists), so this stays constant
/// time regardless of how many bits differ.
#[inline]
pub fn distance(a: BitSignature, b: BitSignature) -> u32 {
    (a.0 ^ b.0).count_ones()
}

/// Convert a distance into a similarity percentage: `(64 - d) / 64 * 100`.
pub fn similarity_percent(distance: u32) -> f64 {
    let distance = distance.min(SIGNATURE_BITS);
    f64::from(SIGNATURE_BITS - distance) / f64::from(SIGNATURE_BITS) * 100.0
}

/// Packs comparison results MSB-first into a [`BitSignature`].
#[derive(Debug, Default)]
pub(crate) struct SignatureBuilder {
    bits: u64,
    len: u32,
}

impl SignatureBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, bit: bool) {
        debug_assert!(self.len < SIGNATURE_BITS, "signature overflow");
        self.bits = (self.bits << 1) | u64::from(bit);
        self.len += 1;
    }

    pub(crate) fn finish(self) -> BitSignature {
        debug_assert_eq!(self.len, SIGNATURE_BITS, "signature underfilled");
        BitSignature(self.bits)
    }
}
