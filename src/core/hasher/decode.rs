//! The decoding collaborator: file path in, grayscale grid out.

use super::fast_decode::FastDecoder;
use super::fast_resize::resize_to_grid;
use super::grid::{GridShape, PixelGrid};
use crate::core::scanner::is_image;
use crate::error::HashError;
use std::path::Path;

/// Turns an image file into a luminance grid of an exact shape.
///
/// Implement this trait to plug in another decoder (e.g., for testing).
pub trait GridDecoder: Send + Sync {
    /// Decode `path`, convert it to grayscale and resample it to `shape`.
    fn decode(&self, path: &Path, shape: GridShape) -> Result<PixelGrid, HashError>;

    /// Whether `path` is a regular file that looks like something this
    /// decoder can read. Defaults to a magic-byte sniff.
    fn accepts(&self, path: &Path) -> bool {
        path.is_file() && is_image(path)
    }
}

/// Production decoder: zune-jpeg / image for decoding, fast_image_resize
/// with nearest-neighbour sampling for the grid.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageGridDecoder;

impl ImageGridDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl GridDecoder for ImageGridDecoder {
    fn decode(&self, path: &Path, shape: GridShape) -> Result<PixelGrid, HashError> {
        let image = FastDecoder::decode(path)?;
        resize_to_grid(&image, shape).map_err(|reason| HashError::DecodeError {
            path: path.to_path_buf(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use tempfile::TempDir;

    #[test]
    fn decodes_to_requested_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.png");
        GrayImage::from_fn(64, 48, |x, y| Luma([(x ^ y) as u8]))
            .save(&path)
            .unwrap();

        let grid = ImageGridDecoder::new()
            .decode(&path, GridShape::new(9, 8))
            .unwrap();

        assert_eq!(grid.shape(), GridShape::new(9, 8));
    }

    #[test]
    fn accepts_images_only() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("photo.png");
        GrayImage::from_pixel(4, 4, Luma([9])).save(&image_path).unwrap();
        let text_path = dir.path().join("notes.png");
        std::fs::write(&text_path, "definitely text").unwrap();

        let decoder = ImageGridDecoder::new();

        assert!(decoder.accepts(&image_path));
        assert!(!decoder.accepts(&text_path));
        assert!(!decoder.accepts(dir.path()));
        assert!(!decoder.accepts(&dir.path().join("missing.png")));
    }
}
