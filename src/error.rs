//! Error types for background removal operations

use thiserror::Error;

/// Result type alias for background removal operations
pub type Result<T> = std::result::Result<T, BgStripError>;

/// Error types for background removal operations
#[derive(Error, Debug)]
pub enum BgStripError {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode or encode errors from the image crate
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Zero-area or otherwise unusable input image
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Unsupported file format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pixel pass or encoding errors
    #[error("Processing error: {0}")]
    Processing(String),
}

impl BgStripError {
    /// Create a new invalid image error
    pub fn invalid_image<S: Into<String>>(msg: S) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Create a new unsupported format error
    pub fn unsupported_format<S: Into<String>>(format: S) -> Self {
        Self::UnsupportedFormat(format.into())
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new processing error
    pub fn processing<S: Into<String>>(msg: S) -> Self {
        Self::Processing(msg.into())
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path_display, error),
        ))
    }

    /// Create configuration error with valid ranges
    pub fn config_value_error<T: std::fmt::Display>(
        parameter: &str,
        value: T,
        valid_range: &str,
        recommended: Option<T>,
    ) -> Self {
        let recommendation = match recommended {
            Some(rec) => format!(" Recommended: {}", rec),
            None => String::new(),
        };

        Self::InvalidConfig(format!(
            "Invalid {}: {} (valid range: {}).{}",
            parameter, value, valid_range, recommendation
        ))
    }

    /// Create processing error with stage context
    pub fn processing_stage_error(stage: &str, details: &str, input_info: Option<&str>) -> Self {
        let input_context = match input_info {
            Some(info) => format!(" (input: {})", info),
            None => String::new(),
        };

        Self::Processing(format!(
            "Processing failed at stage '{}'{}: {}",
            stage, input_context, details
        ))
    }
}
