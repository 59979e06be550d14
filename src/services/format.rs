//! Output format handling service
//!
//! This module separates output format conversion logic from business logic,
//! making the system more testable and maintainable.

use crate::config::OutputFormat;
use image::{DynamicImage, ImageBuffer, RgbaImage};

/// Service for handling output format conversions
pub struct OutputFormatHandler;

impl OutputFormatHandler {
    /// Convert an RGBA image to the specified output format
    ///
    /// # Examples
    /// ```rust
    /// use bgstrip::{services::OutputFormatHandler, OutputFormat};
    /// use image::RgbaImage;
    ///
    /// let rgba_image = RgbaImage::new(100, 100);
    /// let converted = OutputFormatHandler::convert_format(rgba_image, OutputFormat::Png);
    /// ```
    #[must_use]
    pub fn convert_format(rgba_image: RgbaImage, format: OutputFormat) -> DynamicImage {
        match format {
            OutputFormat::Png | OutputFormat::Rgba8 | OutputFormat::Tiff => {
                DynamicImage::ImageRgba8(rgba_image)
            },
            OutputFormat::Jpeg => {
                // Convert RGBA to RGB by dropping alpha channel
                let (width, height) = rgba_image.dimensions();
                let mut rgb_image = ImageBuffer::new(width, height);

                for (x, y, pixel) in rgba_image.enumerate_pixels() {
                    rgb_image.put_pixel(x, y, image::Rgb([pixel[0], pixel[1], pixel[2]]));
                }

                DynamicImage::ImageRgb8(rgb_image)
            },
        }
    }

    /// Get the appropriate file extension for a given output format
    ///
    /// # Examples
    /// ```rust
    /// use bgstrip::{services::OutputFormatHandler, OutputFormat};
    ///
    /// assert_eq!(OutputFormatHandler::get_extension(OutputFormat::Png), "png");
    /// assert_eq!(OutputFormatHandler::get_extension(OutputFormat::Jpeg), "jpg");
    /// ```
    #[must_use]
    pub fn get_extension(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Rgba8 => "raw",
        }
    }

    /// Check if a format supports transparency (alpha channel)
    #[must_use]
    pub fn supports_transparency(format: OutputFormat) -> bool {
        match format {
            OutputFormat::Png | OutputFormat::Tiff | OutputFormat::Rgba8 => true,
            OutputFormat::Jpeg => false,
        }
    }

    /// Validate that a format is appropriate for background removal results
    ///
    /// Warns for formats that don't support transparency, since the
    /// transparent pixels will be flattened onto a solid background.
    pub fn validate_for_background_removal(format: OutputFormat) {
        if !Self::supports_transparency(format) {
            log::warn!(
                "Output format {:?} does not support transparency. Background removal results may appear with a solid background.",
                format
            );
        }
    }
}
