//! Single-channel pixel grids handed to the hash algorithms.

use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of a pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    pub width: u32,
    pub height: u32,
}

impl GridShape {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of samples in a grid of this shape
    pub const fn sample_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A row-major grid of 8-bit luminance samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    shape: GridShape,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// Wrap raw samples. Returns `None` if the sample count does not match
    /// `width * height`.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Option<Self> {
        let shape = GridShape::new(width, height);
        (samples.len() == shape.sample_count()).then_some(Self { shape, samples })
    }

    /// Build a grid by evaluating `f(x, y)` for every position
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> u8,
    {
        let mut samples = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Self {
            shape: GridShape::new(width, height),
            samples,
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn width(&self) -> u32 {
        self.shape.width
    }

    pub fn height(&self) -> u32 {
        self.shape.height
    }

    /// All samples in row-major order
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Sample at column `x`, row `y`
    ///
    /// # Panics
    /// If the position is outside the grid.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.shape.width && y < self.shape.height);
        self.samples[y as usize * self.shape.width as usize + x as usize]
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.samples.chunks_exact(self.shape.width.max(1) as usize)
    }
}

impl From<GrayImage> for PixelGrid {
    fn from(image: GrayImage) -> Self {
        let shape = GridShape::new(image.width(), image.height());
        Self {
            shape,
            samples: image.into_raw(),
        }
    }
}
