//! Tracing configuration module for structured logging
//!
//! This module provides centralized configuration for tracing subscribers,
//! following Rust tracing best practices where applications configure
//! subscribers while libraries only emit trace events.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Tracing configuration builder
#[derive(Debug, Default)]
pub struct TracingConfig {
    /// Verbosity level (maps to log levels)
    pub verbosity: u8,
    /// Environment filter string (overrides verbosity if set)
    pub env_filter: Option<String>,
}

impl TracingConfig {
    /// Create a new tracing configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity level (0-3+)
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set custom environment filter
    #[must_use]
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Convert verbosity level to tracing filter string
    #[must_use]
    pub fn verbosity_to_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "info",  // Default: informational messages and above
            1 => "debug", // -v: internal state and computations
            _ => "trace", // -vv+: extremely detailed traces
        }
    }

    /// Initialize the tracing subscriber based on this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the filter string cannot be parsed or a global
    /// subscriber is already installed.
    pub fn init(self) -> anyhow::Result<()> {
        use tracing_subscriber::fmt;

        let filter = if let Some(env_filter) = &self.env_filter {
            EnvFilter::try_new(env_filter)?
        } else {
            EnvFilter::try_new(self.verbosity_to_filter())?
        };

        let fmt_layer = fmt::layer()
            .with_ansi(true)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .compact();

        Registry::default().with(filter).with(fmt_layer).init();
        Ok(())
    }
}

/// Initialize tracing for CLI usage with the given verbosity
///
/// Honors `RUST_LOG` when set, otherwise maps verbosity counts to levels
/// (0 = info, 1 = debug, 2+ = trace).
///
/// # Errors
///
/// Returns an error if subscriber initialization fails.
pub fn init_cli_tracing(verbosity: u8) -> anyhow::Result<()> {
    let mut config = TracingConfig::new().with_verbosity(verbosity);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        config = config.with_env_filter(env_filter);
    }
    config.init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(TracingConfig::new().with_verbosity(0).verbosity_to_filter(), "info");
        assert_eq!(TracingConfig::new().with_verbosity(1).verbosity_to_filter(), "debug");
        assert_eq!(TracingConfig::new().with_verbosity(2).verbosity_to_filter(), "trace");
        assert_eq!(TracingConfig::new().with_verbosity(9).verbosity_to_filter(), "trace");
    }

    #[test]
    fn test_env_filter_overrides_verbosity() {
        let config = TracingConfig::new()
            .with_verbosity(0)
            .with_env_filter("bgstrip=trace");
        assert_eq!(config.env_filter.as_deref(), Some("bgstrip=trace"));
    }
}
