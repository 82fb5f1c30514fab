//! File reading for the decoder, memory-mapped for large images.

use crate::error::HashError;
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

/// Files at least this large are memory-mapped instead of copied (1 MiB)
pub const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Bytes of an image file, owned or memory-mapped
pub enum FileBytes {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileBytes::Owned(bytes) => bytes,
            FileBytes::Mapped(map) => map,
        }
    }
}

/// Read a whole file, mapping it when it is at least [`MMAP_THRESHOLD`] bytes.
pub fn read_file_bytes(path: &Path) -> Result<FileBytes, HashError> {
    let io_error = |source| HashError::IoError {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_error)?;
    let len = file.metadata().map_err(io_error)?.len();

    if len == 0 {
        return Err(HashError::EmptyImage {
            path: path.to_path_buf(),
        });
    }

    if len >= MMAP_THRESHOLD {
        // SAFETY: the map is read-only and lives no longer than the decode
        // that borrows it; a concurrent truncation would at worst make the
        // decode fail, which is handled as a per-file error.
        let map = unsafe { Mmap::map(&file) }.map_err(io_error)?;
        Ok(FileBytes::Mapped(map))
    } else {
        let mut bytes = Vec::with_capacity(len as usize);
        file.read_to_end(&mut bytes).map_err(io_error)?;
        Ok(FileBytes::Owned(bytes))
    }
}
