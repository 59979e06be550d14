//! Image I/O operations service
//!
//! This module separates file I/O operations from business logic,
//! making the system more testable and maintainable.

use super::format::OutputFormatHandler;
use crate::{
    config::OutputFormat,
    error::{BgStripError, Result},
};
use image::DynamicImage;
use std::path::Path;

/// Service for handling image file input/output operations
pub struct ImageIOService;

impl ImageIOService {
    /// Load an image from a file path
    ///
    /// # Arguments
    /// * `path` - Path to the image file
    ///
    /// # Returns
    /// * `Ok(DynamicImage)` - Successfully loaded image
    /// * `Err(BgStripError)` - Failed to load image
    ///
    /// # Examples
    /// ```rust,no_run
    /// use bgstrip::services::ImageIOService;
    ///
    /// let image = ImageIOService::load_image("input.jpg")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(BgStripError::file_io_error(
                "read image file",
                path_ref,
                &std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }

        // First try extension-based format detection, then fall back to
        // content-based detection.
        match image::open(path_ref) {
            Ok(img) => Ok(img),
            Err(e) => {
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    BgStripError::file_io_error("read image data", path_ref, &io_err)
                })?;

                image::load_from_memory(&data).map_err(|content_err| {
                    let extension = path_ref
                        .extension()
                        .and_then(|s| s.to_str())
                        .unwrap_or("unknown");

                    BgStripError::unsupported_format(format!(
                        "Failed to load '{}' with both extension-based ({}) and content-based detection. Extension error: {}. Content error: {}",
                        path_ref.display(),
                        extension,
                        e,
                        content_err
                    ))
                })
            },
        }
    }

    /// Save an image to a file with the specified format
    ///
    /// This is the single save path for the crate; `RemovalResult::save` and
    /// the CLI both route through it. `jpeg_quality` only affects JPEG output.
    ///
    /// # Arguments
    /// * `image` - The image to save
    /// * `path` - Output file path
    /// * `format` - Output format specification
    /// * `jpeg_quality` - JPEG encoding quality (0-100)
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved image
    /// * `Err(BgStripError)` - Failed to save image
    ///
    /// # Examples
    /// ```rust,no_run
    /// use bgstrip::{services::ImageIOService, OutputFormat};
    /// use image::DynamicImage;
    ///
    /// # let image = DynamicImage::new_rgba8(100, 100);
    /// ImageIOService::save_image(&image, "output.png", OutputFormat::Png, 90)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn save_image<P: AsRef<Path>>(
        image: &DynamicImage,
        path: P,
        format: OutputFormat,
        jpeg_quality: u8,
    ) -> Result<()> {
        let path_ref = path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path_ref.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BgStripError::file_io_error("create output directory", parent, &e)
            })?;
        }

        let result = match format {
            OutputFormat::Png => image.save_with_format(path_ref, image::ImageFormat::Png),
            OutputFormat::Jpeg => {
                // JPEG has no alpha channel; drop it before encoding.
                let rgb =
                    OutputFormatHandler::convert_format(image.to_rgba8(), format).into_rgb8();
                let file = std::fs::File::create(path_ref).map_err(|e| {
                    BgStripError::file_io_error("create output file", path_ref, &e)
                })?;
                let mut encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(file, jpeg_quality);
                encoder.encode_image(&rgb)
            },
            OutputFormat::Tiff => image.save_with_format(path_ref, image::ImageFormat::Tiff),
            OutputFormat::Rgba8 => {
                let rgba8 = image.to_rgba8();
                std::fs::write(path_ref, rgba8.as_raw())
                    .map_err(|e| BgStripError::file_io_error("write RGBA8 data", path_ref, &e))?;
                return Ok(());
            },
        };

        result.map_err(|e| {
            BgStripError::processing(format!(
                "Failed to save as {} to '{}': {}",
                format,
                path_ref.display(),
                e
            ))
        })
    }

    /// Encode an image to bytes in the specified format
    ///
    /// In-memory counterpart of [`Self::save_image`] with the same format
    /// dispatch; `jpeg_quality` only affects JPEG output.
    ///
    /// # Errors
    ///
    /// Returns `BgStripError::Image` when encoding fails.
    pub fn encode_image(
        image: &DynamicImage,
        format: OutputFormat,
        jpeg_quality: u8,
    ) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);

        match format {
            OutputFormat::Png => image.write_to(&mut cursor, image::ImageFormat::Png)?,
            OutputFormat::Jpeg => {
                let rgb =
                    OutputFormatHandler::convert_format(image.to_rgba8(), format).into_rgb8();
                let mut encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, jpeg_quality);
                encoder.encode_image(&rgb)?;
            },
            OutputFormat::Tiff => image.write_to(&mut cursor, image::ImageFormat::Tiff)?,
            OutputFormat::Rgba8 => return Ok(image.to_rgba8().into_raw()),
        }

        Ok(buffer)
    }

    /// Check if a file path has a supported image extension
    pub fn is_supported_format<P: AsRef<Path>>(path: P) -> bool {
        let path_ref = path.as_ref();

        if let Some(extension) = path_ref.extension() {
            if let Some(ext_str) = extension.to_str() {
                let ext_lower = ext_str.to_lowercase();
                matches!(
                    ext_lower.as_str(),
                    "jpg" | "jpeg" | "png" | "tiff" | "tif" | "bmp"
                )
            } else {
                false
            }
        } else {
            false
        }
    }

    /// Load an image from bytes
    ///
    /// Accepts raw encoded image data, making it suitable for processing
    /// images delivered over a network or held in memory.
    ///
    /// # Arguments
    /// * `bytes` - Raw image data as bytes
    ///
    /// # Returns
    /// * `Ok(DynamicImage)` - Successfully loaded image
    /// * `Err(BgStripError)` - Failed to decode image
    pub fn load_from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
        image::load_from_memory(bytes).map_err(|e| {
            BgStripError::unsupported_format(format!("Failed to decode image from bytes: {}", e))
        })
    }
}
