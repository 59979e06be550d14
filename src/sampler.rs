//! Background color sampling
//!
//! Derives a single representative background color from the top edge of an
//! image. For images that were flattened onto a solid color and re-exported
//! (e.g. as JPEG), the top row is normally all background, so its per-channel
//! mean is a usable estimate of that color.

use crate::error::{BgStripError, Result};
use image::{Rgba, RgbaImage};
use tracing::debug;

/// Sample the presumed background color from the top row of `image`.
///
/// Computes the arithmetic mean of each channel independently across the
/// entire row at y=0, truncated to integer. The mean is used regardless of
/// the row's variance; a non-uniform top row yields a blend of its colors.
///
/// # Errors
///
/// Returns `BgStripError::InvalidImage` if the image has zero width or
/// height.
pub fn sample_background(image: &RgbaImage) -> Result<Rgba<u8>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(BgStripError::invalid_image(format!(
            "cannot sample background of a {}x{} image",
            width, height
        )));
    }

    let mut sums = [0u64; 4];
    for x in 0..width {
        let pixel = image.get_pixel(x, 0);
        for (sum, channel) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += u64::from(*channel);
        }
    }

    let divisor = u64::from(width);
    let mean = Rgba([
        (sums[0] / divisor) as u8,
        (sums[1] / divisor) as u8,
        (sums[2] / divisor) as u8,
        (sums[3] / divisor) as u8,
    ]);

    debug!(
        r = mean[0],
        g = mean[1],
        b = mean[2],
        a = mean[3],
        row_width = width,
        "sampled background color from top row"
    );

    Ok(mean)
}

/// Compare two colors on their RGB channels only, ignoring alpha.
#[must_use]
pub fn rgb_matches(a: Rgba<u8>, b: Rgba<u8>) -> bool {
    a.0[..3] == b.0[..3]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_image_samples_exact_color() {
        let color = Rgba([12, 34, 56, 255]);
        let image = RgbaImage::from_pixel(7, 5, color);
        let sampled = sample_background(&image).unwrap();
        assert_eq!(sampled, color);
    }

    #[test]
    fn test_non_uniform_row_samples_truncated_mean() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([10, 0, 255, 255]));
        image.put_pixel(1, 0, Rgba([21, 1, 0, 255]));

        // (10+21)/2 = 15 (truncated), (0+1)/2 = 0, (255+0)/2 = 127
        let sampled = sample_background(&image).unwrap();
        assert_eq!(sampled, Rgba([15, 0, 127, 255]));
    }

    #[test]
    fn test_only_top_row_is_sampled() {
        let mut image = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
        for x in 0..3 {
            image.put_pixel(x, 0, Rgba([200, 100, 50, 255]));
        }
        let sampled = sample_background(&image).unwrap();
        assert_eq!(sampled, Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn test_zero_width_image_is_rejected() {
        let image = RgbaImage::new(0, 4);
        assert!(matches!(
            sample_background(&image),
            Err(BgStripError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_zero_height_image_is_rejected() {
        let image = RgbaImage::new(4, 0);
        assert!(matches!(
            sample_background(&image),
            Err(BgStripError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_rgb_matches_ignores_alpha() {
        assert!(rgb_matches(Rgba([1, 2, 3, 0]), Rgba([1, 2, 3, 255])));
        assert!(!rgb_matches(Rgba([1, 2, 3, 255]), Rgba([1, 2, 4, 255])));
    }
}
