#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # bgstrip
//!
//! Background removal for flattened images, implemented as a pure pixel
//! transform: no neural network, no external services. The transform assumes
//! the input was composited onto a solid background (as happens when a cutout
//! is re-exported as JPEG) and works in three sequential stages over one
//! in-memory pixel buffer:
//!
//! 1. **Background sampler** - averages the top row of pixels into a single
//!    representative background color.
//! 2. **Flood-fill mask builder** - flood fills a reachability mask over the
//!    image canvas padded by one cell per side, seeded at the corner, using
//!    4-connected adjacency.
//! 3. **Pixel recolorer** - every mask-covered pixel whose RGB exactly equals
//!    the sampled background becomes fully transparent white; every other
//!    pixel keeps its original RGBA.
//!
//! The transform is synchronous, deterministic, and touches no global state;
//! separate images can be processed concurrently by separate callers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bgstrip::{remove_background_from_file, RemovalConfig};
//!
//! # fn example() -> bgstrip::Result<()> {
//! let config = RemovalConfig::default();
//! let result = remove_background_from_file("input.jpg", &config)?;
//! result.save_png("output.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Memory-based processing
//!
//! ```rust,no_run
//! use bgstrip::{remove_background_from_bytes, OutputFormat, RemovalConfig};
//!
//! # fn example(upload_bytes: Vec<u8>) -> bgstrip::Result<()> {
//! let config = RemovalConfig::default();
//! let result = remove_background_from_bytes(&upload_bytes, &config)?;
//! let png_bytes = result.to_bytes(OutputFormat::Png, 100)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Library vs CLI Usage
//!
//! - **Library usage**: all processing functionality is available by default.
//! - **CLI usage**: enable the `cli` feature for the `bgstrip` binary with
//!   batch processing and progress reporting.
//!
//! To use only as a library without CLI dependencies:
//!
//! ```toml
//! [dependencies]
//! bgstrip = { version = "0.1", default-features = false }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod mask;
pub mod processor;
pub mod sampler;
pub mod services;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;

// Public API exports
pub use config::{OutputFormat, RemovalConfig, RemovalConfigBuilder};
pub use error::{BgStripError, Result};
pub use mask::ReachabilityMask;
pub use processor::{recolor, BackgroundRemovalProcessor};
pub use sampler::{rgb_matches, sample_background};
pub use services::{ImageIOService, OutputFormatHandler};
pub use types::{MaskStatistics, ProcessingMetadata, ProcessingTimings, RemovalResult};

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, TracingConfig};

/// Remove the background from an image file
///
/// Decodes the file, runs the transform, and returns the result. The caller
/// decides where and in which format to save it.
///
/// # Errors
///
/// Returns `BgStripError` for file I/O failures, undecodable input, and
/// zero-area or oversized images.
///
/// # Examples
/// ```rust,no_run
/// use bgstrip::{remove_background_from_file, RemovalConfig};
///
/// # fn example() -> bgstrip::Result<()> {
/// let result = remove_background_from_file("photo.jpg", &RemovalConfig::default())?;
/// result.save_png("photo_nobg.png")?;
/// # Ok(())
/// # }
/// ```
pub fn remove_background_from_file<P: AsRef<std::path::Path>>(
    path: P,
    config: &RemovalConfig,
) -> Result<RemovalResult> {
    let processor = BackgroundRemovalProcessor::new(config.clone())?;
    processor.process_file(path)
}

/// Remove the background from an image provided as bytes
///
/// Accepts raw encoded image data (PNG, JPEG, TIFF), making it suitable
/// for web servers and other memory-based pipelines where files aren't
/// available.
///
/// # Errors
///
/// Returns `BgStripError::UnsupportedFormat` when the bytes cannot be decoded
/// into an RGB/RGBA buffer, and `BgStripError::InvalidImage` for zero-area
/// input.
pub fn remove_background_from_bytes(
    image_bytes: &[u8],
    config: &RemovalConfig,
) -> Result<RemovalResult> {
    let processor = BackgroundRemovalProcessor::new(config.clone())?;
    processor.process_bytes(image_bytes)
}

/// Remove the background from a `DynamicImage` directly
///
/// The most flexible entry point for in-memory processing: no file or decode
/// step involved.
///
/// # Errors
///
/// Returns `BgStripError::InvalidImage` for zero-area input or input
/// exceeding the configured `max_dimension`.
pub fn remove_background_from_image(
    image: &image::DynamicImage,
    config: &RemovalConfig,
) -> Result<RemovalResult> {
    let processor = BackgroundRemovalProcessor::new(config.clone())?;
    processor.process_image(image)
}
