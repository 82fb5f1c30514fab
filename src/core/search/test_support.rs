//! Decoder stub that lets tests dictate each candidate's aHash.

use crate::core::hasher::{GridDecoder, GridShape, PixelGrid};
use crate::error::HashError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Serves 8x8 grids whose average hash is exactly the registered bits.
///
/// A set bit becomes a 255 sample and a clear bit a 0 sample, so any
/// pattern with at least one set bit hashes back to itself. Unknown paths
/// fail to decode.
#[derive(Default)]
pub(crate) struct StubDecoder {
    grids: HashMap<PathBuf, u64>,
    decodes: Arc<AtomicUsize>,
}

impl StubDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, bits: u64) -> Self {
        self.grids.insert(path.into(), bits);
        self
    }

    /// Shared counter of decode attempts
    pub fn decode_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.decodes)
    }
}

impl GridDecoder for StubDecoder {
    fn decode(&self, path: &Path, shape: GridShape) -> Result<PixelGrid, HashError> {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        let bits = self
            .grids
            .get(path)
            .copied()
            .ok_or_else(|| HashError::DecodeError {
                path: path.to_path_buf(),
                reason: "unsupported format".to_string(),
            })?;

        Ok(PixelGrid::from_fn(shape.width, shape.height, |x, y| {
            let index = y * shape.width + x;
            if (bits >> (63 - index)) & 1 == 1 {
                255
            } else {
                0
            }
        }))
    }

    fn accepts(&self, path: &Path) -> bool {
        self.grids.contains_key(path)
    }
}
