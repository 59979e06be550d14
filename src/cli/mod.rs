//! Command-line interface for background removal

mod config;
mod main;

pub use config::CliConfigBuilder;
pub use main::{main, Cli, CliOutputFormat};
