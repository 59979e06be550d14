//! bgstrip CLI tool
//!
//! Command-line interface for removing flattened backgrounds from images
//! using the bgstrip library.

#[cfg(feature = "cli")]
use bgstrip::cli;

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    cli::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
