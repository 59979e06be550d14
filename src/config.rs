//! Configuration types for background removal operations

use serde::{Deserialize, Serialize};

/// Output image format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// PNG with alpha channel transparency
    Png,
    /// JPEG (no transparency, alpha dropped on encode)
    Jpeg,
    /// TIFF with alpha channel transparency and lossless compression
    Tiff,
    /// Raw RGBA8 pixel data (4 bytes per pixel)
    Rgba8,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Png
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Jpeg => write!(f, "jpeg"),
            Self::Tiff => write!(f, "tiff"),
            Self::Rgba8 => write!(f, "rgba8"),
        }
    }
}

/// Configuration for background removal operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalConfig {
    /// Output format
    pub output_format: OutputFormat,

    /// JPEG quality (0-100, only used for JPEG output)
    pub jpeg_quality: u8,

    /// Enable debug mode (additional logging and validation)
    pub debug: bool,

    /// Reject images whose width or height exceeds this value (None = unlimited).
    ///
    /// The flood fill and the pixel pass are both linear in pixel count with no
    /// early exit, so overall latency is bounded by limiting input dimensions
    /// before the transform runs.
    pub max_dimension: Option<u32>,
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            jpeg_quality: 90,
            debug: false,
            max_dimension: None,
        }
    }
}

impl RemovalConfig {
    /// Create a new configuration builder for fluent API construction
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bgstrip::{OutputFormat, RemovalConfig};
    ///
    /// let config = RemovalConfig::builder()
    ///     .output_format(OutputFormat::Png)
    ///     .max_dimension(4096)
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> RemovalConfigBuilder {
        RemovalConfigBuilder::default()
    }

    /// Validate all configuration parameters
    ///
    /// # Validation Rules
    ///
    /// - JPEG quality: 0-100 (inclusive)
    /// - Max dimension: must be non-zero when set
    ///
    /// # Errors
    /// - Invalid JPEG quality value (must be 0-100)
    /// - Zero max dimension
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bgstrip::RemovalConfig;
    ///
    /// let mut config = RemovalConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.jpeg_quality = 150; // Invalid
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> crate::Result<()> {
        if self.jpeg_quality > 100 {
            return Err(crate::error::BgStripError::config_value_error(
                "JPEG quality",
                self.jpeg_quality,
                "0-100",
                Some(90),
            ));
        }

        if self.max_dimension == Some(0) {
            return Err(crate::error::BgStripError::invalid_config(
                "max_dimension must be greater than 0 when set",
            ));
        }

        Ok(())
    }
}

/// Builder for `RemovalConfig`
#[derive(Debug, Default)]
pub struct RemovalConfigBuilder {
    config: RemovalConfig,
}

impl RemovalConfigBuilder {
    /// Set output format
    #[must_use]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// Set JPEG quality
    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality.min(100);
        self
    }

    /// Enable debug mode
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Set the maximum accepted input dimension
    #[must_use]
    pub fn max_dimension(mut self, max: u32) -> Self {
        self.config.max_dimension = Some(max);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BgStripError::InvalidConfig` if validation fails.
    pub fn build(self) -> crate::Result<RemovalConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
