//! Fast SIMD-accelerated downscaling to hash grids.
//!
//! Uses the fast_image_resize crate, which picks AVX2/NEON code paths
//! when available. Hash grids are produced with nearest-neighbour
//! sampling after grayscale conversion.

use super::grid::{GridShape, PixelGrid};
use fast_image_resize::{images::Image, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::DynamicImage;

/// Convert `image` to luminance and resize it to exactly `shape` with
/// nearest-neighbour sampling.
///
/// Errors are returned as plain reasons; the caller attaches the path.
pub fn resize_to_grid(image: &DynamicImage, shape: GridShape) -> Result<PixelGrid, String> {
    // Grayscale first: one channel is cheaper to resample than three
    let gray = image.to_luma8();
    let (src_width, src_height) = gray.dimensions();

    if src_width == 0 || src_height == 0 {
        return Err("image has no pixels".to_string());
    }
    if shape.sample_count() == 0 {
        return Err(format!("invalid target grid {}", shape));
    }

    let src = Image::from_vec_u8(src_width, src_height, gray.into_raw(), PixelType::U8)
        .map_err(|e| format!("failed to wrap source image: {}", e))?;
    let mut dst = Image::new(shape.width, shape.height, PixelType::U8);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Nearest);
    Resizer::new()
        .resize(&src, &mut dst, &options)
        .map_err(|e| format!("resize failed: {}", e))?;

    PixelGrid::from_raw(shape.width, shape.height, dst.into_vec())
        .ok_or_else(|| "resized buffer does not match target grid".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            let b = ((x + y) * 128 / (width + height).max(1)) as u8;
            Rgb([r, g, b])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn resize_produces_each_variant_shape() {
        let image = create_test_image(100, 100);

        for shape in [GridShape::new(8, 8), GridShape::new(9, 8), GridShape::new(32, 32)] {
            let grid = resize_to_grid(&image, shape).unwrap();
            assert_eq!(grid.shape(), shape);
        }
    }

    #[test]
    fn resize_upscales_small_images() {
        let image = create_test_image(4, 4);
        let grid = resize_to_grid(&image, GridShape::new(32, 32)).unwrap();
        assert_eq!(grid.samples().len(), 1024);
    }

    #[test]
    fn uniform_image_stays_uniform() {
        let image = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
            50,
            40,
            image::Luma([77]),
        ));
        let grid = resize_to_grid(&image, GridShape::new(9, 8)).unwrap();
        assert!(grid.samples().iter().all(|&s| s == 77));
    }

    #[test]
    fn repeated_resizes_agree() {
        let image = create_test_image(64, 48);

        let first = resize_to_grid(&image, GridShape::new(8, 8)).unwrap();
        let second = resize_to_grid(&image, GridShape::new(8, 8)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn nearest_sampling_keeps_block_values() {
        // 8x8 blocks of distinct values survive a 64 -> 8 downscale untouched
        let image = DynamicImage::ImageLuma8(image::GrayImage::from_fn(64, 64, |x, y| {
            image::Luma([((x / 8) * 8 + y / 8) as u8 * 3])
        }));

        let grid = resize_to_grid(&image, GridShape::new(8, 8)).unwrap();

        assert_eq!(grid.get(2, 5), (2 * 8 + 5) * 3);
        assert_eq!(grid.get(7, 0), (7 * 8) * 3);
    }
}
