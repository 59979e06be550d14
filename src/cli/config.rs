//! CLI argument to library configuration conversion

use super::main::{Cli, CliOutputFormat};
use crate::config::{OutputFormat, RemovalConfig};
use anyhow::{Context, Result};

/// Builds a `RemovalConfig` from parsed CLI arguments
pub struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Validate CLI arguments before building a configuration
    ///
    /// # Errors
    ///
    /// Fails for quality values outside 0-100 and a zero max dimension.
    pub fn validate_cli(cli: &Cli) -> Result<()> {
        if cli.jpeg_quality > 100 {
            anyhow::bail!("JPEG quality must be 0-100, got {}", cli.jpeg_quality);
        }
        if cli.max_dimension == Some(0) {
            anyhow::bail!("--max-dimension must be greater than 0");
        }
        Ok(())
    }

    /// Convert CLI arguments to a library configuration
    ///
    /// # Errors
    ///
    /// Fails when the resulting configuration does not validate.
    pub fn from_cli(cli: &Cli) -> Result<RemovalConfig> {
        let mut builder = RemovalConfig::builder()
            .output_format(Self::map_output_format(cli.format))
            .jpeg_quality(cli.jpeg_quality)
            .debug(cli.verbose >= 2);

        if let Some(max) = cli.max_dimension {
            builder = builder.max_dimension(max);
        }

        builder.build().context("Failed to build configuration")
    }

    fn map_output_format(format: CliOutputFormat) -> OutputFormat {
        match format {
            CliOutputFormat::Png => OutputFormat::Png,
            CliOutputFormat::Jpeg => OutputFormat::Jpeg,
            CliOutputFormat::Tiff => OutputFormat::Tiff,
            CliOutputFormat::Rgba8 => OutputFormat::Rgba8,
        }
    }
}
