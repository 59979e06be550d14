//! Core types for background removal operations

use crate::{config::OutputFormat, error::Result, services::ImageIOService};
use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of a background removal operation
#[derive(Debug, Clone)]
pub struct RemovalResult {
    /// The processed image with background made transparent
    pub image: DynamicImage,

    /// The color that was treated as background, as `[r, g, b, a]`
    pub background_color: [u8; 4],

    /// Original image dimensions
    pub original_dimensions: (u32, u32),

    /// Processing metadata
    pub metadata: ProcessingMetadata,

    /// Original input path (for logging purposes)
    pub input_path: Option<String>,
}

impl RemovalResult {
    /// Create a new removal result
    #[must_use]
    pub fn new(
        image: DynamicImage,
        background_color: [u8; 4],
        original_dimensions: (u32, u32),
        metadata: ProcessingMetadata,
    ) -> Self {
        Self {
            image,
            background_color,
            original_dimensions,
            metadata,
            input_path: None,
        }
    }

    /// Attach the input path for logging purposes
    #[must_use]
    pub fn with_input_path(mut self, input_path: String) -> Self {
        self.input_path = Some(input_path);
        self
    }

    /// Save the result as PNG with alpha channel
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save(path, OutputFormat::Png, 100)
    }

    /// Save in the specified format
    ///
    /// Delegates to [`ImageIOService::save_image`], which owns the format
    /// dispatch and JPEG alpha handling. `quality` only affects JPEG output.
    pub fn save<P: AsRef<Path>>(&self, path: P, format: OutputFormat, quality: u8) -> Result<()> {
        ImageIOService::save_image(&self.image, path, format, quality)
    }

    /// Get the image as raw RGBA bytes
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.image.to_rgba8().into_raw()
    }

    /// Get the image as encoded bytes in the specified format
    pub fn to_bytes(&self, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
        ImageIOService::encode_image(&self.image, format, quality)
    }

    /// Get image dimensions
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Get detailed timing breakdown
    #[must_use]
    pub fn timings(&self) -> &ProcessingTimings {
        &self.metadata.timings
    }

    /// Per-pixel transparency statistics of the output image
    #[must_use]
    pub fn statistics(&self) -> MaskStatistics {
        let rgba = self.image.to_rgba8();
        let total_pixels = (rgba.width() as usize) * (rgba.height() as usize);
        let transparent_pixels = rgba.pixels().filter(|p| p.0[3] == 0).count();

        MaskStatistics {
            total_pixels,
            transparent_pixels,
            opaque_pixels: total_pixels - transparent_pixels,
            transparent_ratio: if total_pixels == 0 {
                0.0
            } else {
                transparent_pixels as f32 / total_pixels as f32
            },
        }
    }
}

/// Statistics about the transparency decision across an output image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskStatistics {
    pub total_pixels: usize,
    pub transparent_pixels: usize,
    pub opaque_pixels: usize,
    pub transparent_ratio: f32,
}

/// Detailed timing breakdown for background removal processing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingTimings {
    /// Image loading and decoding from file or bytes
    pub image_decode_ms: u64,

    /// Background color sampling from the top row
    pub sampling_ms: u64,

    /// Flood-fill reachability mask construction
    pub flood_fill_ms: u64,

    /// Per-pixel recolor pass
    pub recolor_ms: u64,

    /// Final image encoding (if saving to file)
    pub image_encode_ms: Option<u64>,

    /// Total end-to-end processing time
    pub total_ms: u64,
}

impl ProcessingTimings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time not accounted for by the measured stages
    #[must_use]
    pub fn other_overhead_ms(&self) -> u64 {
        let measured = self.image_decode_ms
            + self.sampling_ms
            + self.flood_fill_ms
            + self.recolor_ms
            + self.image_encode_ms.unwrap_or(0);

        self.total_ms.saturating_sub(measured)
    }
}

/// Metadata about the processing operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    /// Detailed timing breakdown
    pub timings: ProcessingTimings,

    /// Input image format, when known
    pub input_format: String,

    /// Output image format
    pub output_format: String,
}

impl ProcessingMetadata {
    /// Create new processing metadata
    #[must_use]
    pub fn new() -> Self {
        Self {
            timings: ProcessingTimings::new(),
            input_format: "unknown".to_string(),
            output_format: "png".to_string(),
        }
    }

    /// Set timing information
    pub fn set_timings(&mut self, timings: ProcessingTimings) {
        self.timings = timings;
    }
}

impl Default for ProcessingMetadata {
    fn default() -> Self {
        Self::new()
    }
}
