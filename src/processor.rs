//! Unified background removal processor
//!
//! This module provides the main `BackgroundRemovalProcessor` that
//! consolidates the three transform stages: background sampling, flood-fill
//! mask construction, and the per-pixel recolor pass. Data flows strictly
//! forward through the stages over a single in-memory pixel buffer.

use crate::{
    config::RemovalConfig,
    error::{BgStripError, Result},
    mask::ReachabilityMask,
    sampler::{rgb_matches, sample_background},
    types::{ProcessingMetadata, ProcessingTimings, RemovalResult},
};
use image::{DynamicImage, Rgba, RgbaImage};
use instant::Instant;
use std::path::Path;
use tracing::{debug, info, instrument, span, Level};

/// Background removal processor driving the sample -> fill -> recolor pipeline.
///
/// The processor holds no mutable state between calls; each invocation
/// allocates its own mask and output buffer, so one processor can be shared
/// freely and separate images may be processed concurrently by separate
/// callers.
pub struct BackgroundRemovalProcessor {
    config: RemovalConfig,
}

impl BackgroundRemovalProcessor {
    /// Create a new processor with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `BgStripError::InvalidConfig` if the configuration fails
    /// validation.
    pub fn new(config: RemovalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &RemovalConfig {
        &self.config
    }

    /// Process an image file for background removal
    ///
    /// # Errors
    ///
    /// Returns `BgStripError` for:
    /// - File I/O errors when reading input
    /// - Image format parsing failures
    /// - Zero-area or oversized input images
    pub fn process_file<P: AsRef<Path>>(&self, input_path: P) -> Result<RemovalResult> {
        let input_path_ref = input_path.as_ref();

        let decode_start = Instant::now();
        let image = crate::services::ImageIOService::load_image(input_path_ref)?;
        let decode_ms = decode_start.elapsed().as_millis() as u64;

        let input_format = input_path_ref
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_lowercase();

        let mut result = self.process_decoded(&image, decode_ms, &input_format)?;
        result.input_path = Some(input_path_ref.display().to_string());
        Ok(result)
    }

    /// Process image data from bytes
    ///
    /// Accepts raw encoded image bytes (PNG, JPEG, TIFF, ...), making this
    /// suitable for web servers and memory-based processing where files
    /// aren't available.
    ///
    /// # Errors
    ///
    /// Returns `BgStripError::UnsupportedFormat` when the bytes cannot be
    /// decoded, plus the same errors as [`Self::process_image`].
    pub fn process_bytes(&self, image_bytes: &[u8]) -> Result<RemovalResult> {
        let decode_start = Instant::now();
        let image = crate::services::ImageIOService::load_from_bytes(image_bytes)?;
        let decode_ms = decode_start.elapsed().as_millis() as u64;

        self.process_decoded(&image, decode_ms, "bytes")
    }

    /// Process a `DynamicImage` directly for background removal
    ///
    /// # Errors
    ///
    /// Returns `BgStripError::InvalidImage` for zero-area input or input
    /// exceeding the configured `max_dimension`.
    pub fn process_image(&self, image: &DynamicImage) -> Result<RemovalResult> {
        self.process_decoded(image, 0, "memory")
    }

    #[instrument(
        skip(self, image),
        fields(dimensions = %format!("{}x{}", image.width(), image.height()))
    )]
    fn process_decoded(
        &self,
        image: &DynamicImage,
        decode_ms: u64,
        input_format: &str,
    ) -> Result<RemovalResult> {
        let total_start = Instant::now();
        let mut timings = ProcessingTimings::new();
        timings.image_decode_ms = decode_ms;

        let (width, height) = (image.width(), image.height());
        self.validate_dimensions(width, height)?;

        info!(width, height, "starting background removal");

        // Alpha is forced to 255 here when the source has no alpha channel.
        let rgba = image.to_rgba8();

        let background = {
            let _span = span!(Level::DEBUG, "sampling", row_width = width).entered();
            let sample_start = Instant::now();
            let color = sample_background(&rgba)?;
            timings.sampling_ms = sample_start.elapsed().as_millis() as u64;
            color
        };

        let mask = {
            let _span = span!(Level::DEBUG, "flood_fill", width, height).entered();
            let fill_start = Instant::now();
            let mask = ReachabilityMask::flood_filled(width, height);
            timings.flood_fill_ms = fill_start.elapsed().as_millis() as u64;
            mask
        };

        let output = {
            let _span = span!(Level::DEBUG, "recolor", width, height).entered();
            let recolor_start = Instant::now();
            let output = recolor(&rgba, background, &mask);
            timings.recolor_ms = recolor_start.elapsed().as_millis() as u64;
            output
        };

        timings.total_ms = total_start.elapsed().as_millis() as u64;

        if self.config.debug {
            debug!(
                background = ?background.0,
                decode_ms = timings.image_decode_ms,
                sampling_ms = timings.sampling_ms,
                flood_fill_ms = timings.flood_fill_ms,
                recolor_ms = timings.recolor_ms,
                total_ms = timings.total_ms,
                "transform stage timings"
            );
        }

        let mut metadata = ProcessingMetadata::new();
        metadata.input_format = input_format.to_string();
        metadata.output_format = self.config.output_format.to_string();
        metadata.set_timings(timings);

        info!(
            total_ms = metadata.timings.total_ms,
            "background removal complete"
        );

        Ok(RemovalResult::new(
            DynamicImage::ImageRgba8(output),
            background.0,
            (width, height),
            metadata,
        ))
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(BgStripError::invalid_image(format!(
                "image has zero area ({}x{})",
                width, height
            )));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                return Err(BgStripError::invalid_image(format!(
                    "image {}x{} exceeds configured maximum dimension {}",
                    width, height, max
                )));
            }
        }

        Ok(())
    }
}

/// Rewrite pixels of `image` according to `mask` and the sampled `background`.
///
/// For each pixel `(x, y)`: if the mask covers the pixel (cell `(x+1, y+1)`
/// is reached) and the pixel's RGB equals the background RGB exactly, the
/// output pixel becomes fully transparent white `(255, 255, 255, 0)`.
/// Otherwise the original RGBA is kept unchanged.
///
/// Pure function of its inputs; reusing the same background color and mask,
/// applying it twice produces the same output as applying it once.
#[must_use]
pub fn recolor(image: &RgbaImage, background: Rgba<u8>, mask: &ReachabilityMask) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut output = RgbaImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let out = if mask.covers_pixel(x, y) && rgb_matches(*pixel, background) {
            Rgba([255, 255, 255, 0])
        } else {
            *pixel
        };
        output.put_pixel(x, y, out);
    }

    output
}
