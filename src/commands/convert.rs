//! Convert command implementation.
//!
//! Decodes a report and writes it out as canonical XML or as a JSON
//! export of the decoded graph.

use crate::commands::models::{decode_options, ConvertArgs, OutputFormat};
use crate::output::{write_json, write_xml};
use crate::parser::decode_with;
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * File read or write errors
/// * Decode errors
pub fn execute_convert(args: &ConvertArgs) -> Result<()> {
    let start_time = Instant::now();

    info!(
        "Converting {} to {:?}: {}",
        args.input.display(),
        args.format,
        args.output.display()
    );

    let input = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let run = decode_with(&input, &decode_options(args.lenient))
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    match args.format {
        OutputFormat::Xml => write_xml(&run, &args.output),
        OutputFormat::Json => write_json(&run, &args.output),
    }
    .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Conversion completed in {:.2?}", start_time.elapsed());

    Ok(())
}
