//! Background removal CLI tool
//!
//! Command-line interface for removing flattened backgrounds from images
//! using the flood-fill processor.

use super::config::CliConfigBuilder;
use crate::{
    processor::BackgroundRemovalProcessor,
    services::{ImageIOService, OutputFormatHandler},
    tracing_config::init_cli_tracing,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Background removal CLI tool
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "bgstrip")]
pub struct Cli {
    /// Input image files or directories (use "-" for stdin)
    #[arg(value_name = "INPUT", required = true)]
    pub input: Vec<String>,

    /// Output file (single input) or directory (batch processing). Use "-" for stdout.
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = CliOutputFormat::Png)]
    pub format: CliOutputFormat,

    /// JPEG quality (0-100)
    #[arg(long, default_value_t = 90)]
    pub jpeg_quality: u8,

    /// Reject images wider or taller than this many pixels
    #[arg(long, value_name = "PIXELS")]
    pub max_dimension: Option<u32>,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Process directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Pattern for batch processing (e.g., "*.jpg")
    #[arg(long)]
    pub pattern: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum CliOutputFormat {
    Png,
    Jpeg,
    Tiff,
    Rgba8,
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    init_cli_tracing(cli.verbose).context("Failed to initialize tracing")?;

    CliConfigBuilder::validate_cli(&cli).context("Invalid CLI arguments")?;
    let config = CliConfigBuilder::from_cli(&cli).context("Failed to build configuration")?;

    OutputFormatHandler::validate_for_background_removal(config.output_format);

    info!("Starting background removal");
    info!("Input(s): {}", cli.input.join(", "));
    info!("Output format: {}", config.output_format);

    let processor = BackgroundRemovalProcessor::new(config)
        .context("Failed to create background removal processor")?;

    let start_time = Instant::now();
    let processed_count = process_inputs(&cli, &processor)?;

    let total_time = start_time.elapsed();
    info!(
        "Processed {} image(s) in {:.2}s",
        processed_count,
        total_time.as_secs_f64()
    );

    Ok(())
}

fn process_inputs(cli: &Cli, processor: &BackgroundRemovalProcessor) -> Result<usize> {
    // Handle stdin specially (single input)
    if cli.input.len() == 1 && cli.input.first().is_some_and(|s| s == "-") {
        return process_stdin(cli.output.as_deref(), processor);
    }

    // Collect all image files from inputs (files and directories)
    let mut all_files = Vec::new();

    for input in &cli.input {
        let path = PathBuf::from(input);

        if path.is_file() {
            if ImageIOService::is_supported_format(&path) {
                all_files.push(path);
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            let dir_files = find_image_files(&path, cli.recursive, cli.pattern.as_deref())?;
            all_files.extend(dir_files);
        } else {
            anyhow::bail!(
                "Input path does not exist or is not accessible: {}",
                path.display()
            );
        }
    }

    if all_files.is_empty() {
        warn!("No supported image files found in the provided inputs");
        return Ok(0);
    }

    // Sort files alphanumerically for consistent processing order
    all_files.sort();

    info!("Found {} image file(s) to process", all_files.len());

    let file_count = all_files.len();
    let progress = if file_count > 1 {
        let pb = ProgressBar::new(file_count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Validate and prepare output directory for batch processing
    let output_dir = if file_count > 1 {
        if let Some(ref output) = cli.output {
            if output == "-" {
                anyhow::bail!("Cannot use stdout (-) as output when processing multiple files");
            }
            let output_path = PathBuf::from(output);
            if !output_path.exists() {
                std::fs::create_dir_all(&output_path).with_context(|| {
                    format!(
                        "Failed to create output directory: {}",
                        output_path.display()
                    )
                })?;
            } else if output_path.is_file() {
                anyhow::bail!(
                    "Output path exists and is a file, not a directory: {}",
                    output_path.display()
                );
            }
            Some(output_path)
        } else {
            None
        }
    } else {
        None
    };

    let mut processed_count = 0;
    let mut failed_count = 0;

    for input_file in &all_files {
        if let Some(ref pb) = progress {
            pb.set_message(format!("Processing {}", input_file.display()));
        }

        let output_path = if file_count == 1 {
            cli.output.clone()
        } else {
            output_dir
                .as_ref()
                .map(|dir| generate_output_path_with_dir(input_file, dir, processor))
                .or_else(|| Some(generate_output_path(input_file, processor)))
        };

        match process_single_file(processor, input_file, output_path.as_deref()) {
            Ok(()) => processed_count += 1,
            Err(e) => {
                failed_count += 1;
                warn!("Failed to process {}: {}", input_file.display(), e);
            },
        }

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message(format!(
            "Done: {} processed, {} failed",
            processed_count, failed_count
        ));
    }

    if processed_count == 0 && failed_count > 0 {
        anyhow::bail!("All {} input file(s) failed to process", failed_count);
    }

    Ok(processed_count)
}

/// Process a single file and write the result
fn process_single_file(
    processor: &BackgroundRemovalProcessor,
    input_path: &Path,
    output: Option<&str>,
) -> Result<()> {
    let result = processor
        .process_file(input_path)
        .with_context(|| format!("Failed to process {}", input_path.display()))?;

    let config = processor.config();

    match output {
        Some("-") => {
            let bytes = result.to_bytes(config.output_format, config.jpeg_quality)?;
            write_to_stdout(&bytes)?;
        },
        Some(path) => {
            result.save(path, config.output_format, config.jpeg_quality)?;
            info!("{} -> {}", input_path.display(), path);
        },
        None => {
            let path = generate_output_path(input_path, processor);
            result.save(&path, config.output_format, config.jpeg_quality)?;
            info!("{} -> {}", input_path.display(), path);
        },
    }

    Ok(())
}

/// Read an image from stdin, process it, and write the result
fn process_stdin(output: Option<&str>, processor: &BackgroundRemovalProcessor) -> Result<usize> {
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read image data from stdin")?;

    let result = processor
        .process_bytes(&buffer)
        .context("Failed to process image from stdin")?;

    let config = processor.config();
    match output {
        Some("-") | None => {
            let bytes = result.to_bytes(config.output_format, config.jpeg_quality)?;
            write_to_stdout(&bytes)?;
        },
        Some(path) => {
            result.save(path, config.output_format, config.jpeg_quality)?;
            info!("stdin -> {}", path);
        },
    }

    Ok(1)
}

fn write_to_stdout(data: &[u8]) -> Result<()> {
    io::stdout()
        .write_all(data)
        .context("Failed to write image data to stdout")?;
    io::stdout().flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Find image files in a directory
fn find_image_files(dir: &Path, recursive: bool, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if recursive {
        for entry in walkdir::WalkDir::new(dir) {
            let entry = entry?;
            if entry.file_type().is_file() {
                let path = entry.path();
                if ImageIOService::is_supported_format(path) && matches_pattern(path, pattern) {
                    files.push(path.to_path_buf());
                }
            }
        }
    } else {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let path = entry.path();
                if ImageIOService::is_supported_format(&path) && matches_pattern(&path, pattern) {
                    files.push(path);
                }
            }
        }
    }

    Ok(files)
}

/// Check if file matches the given glob pattern
fn matches_pattern(path: &Path, pattern: Option<&str>) -> bool {
    match pattern {
        Some(pat) => {
            if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
                glob::Pattern::new(pat)
                    .map(|p| p.matches(filename))
                    .unwrap_or(false)
            } else {
                false
            }
        },
        None => true,
    }
}

/// Generate output path next to the input with the correct extension
fn generate_output_path(input_path: &Path, processor: &BackgroundRemovalProcessor) -> String {
    let stem = input_path.file_stem().unwrap_or_default();
    let dir = input_path.parent().unwrap_or(Path::new("."));
    let extension = OutputFormatHandler::get_extension(processor.config().output_format);

    dir.join(format!("{}_nobg.{}", stem.to_string_lossy(), extension))
        .to_string_lossy()
        .to_string()
}

/// Generate output path inside a custom output directory
fn generate_output_path_with_dir(
    input_path: &Path,
    output_dir: &Path,
    processor: &BackgroundRemovalProcessor,
) -> String {
    let stem = input_path.file_stem().unwrap_or_default();
    let extension = OutputFormatHandler::get_extension(processor.config().output_format);

    output_dir
        .join(format!("{}_nobg.{}", stem.to_string_lossy(), extension))
        .to_string_lossy()
        .to_string()
}
