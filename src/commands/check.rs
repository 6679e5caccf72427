//! Check command implementation.
//!
//! The check command:
//! 1. Reads the report
//! 2. Decodes it (strict or lenient)
//! 3. Re-encodes it and confirms the result decodes strictly
//! 4. Summarizes what was found

use crate::commands::models::{decode_options, CheckArgs, RunSummary};
use crate::output::encode;
use crate::parser::{decode, decode_with};
use anyhow::{bail, Context, Result};
use log::{debug, info};

/// Outcome of a successful check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub summary: RunSummary,
    /// Whether the input already was in canonical form
    pub canonical: bool,
    pub bytes: usize,
}

/// Execute the check command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Check command arguments
///
/// # Returns
/// A report of the checked document
///
/// # Errors
/// * File read errors
/// * Decode errors, with the offending field path
/// * Re-encoded output that does not decode strictly
pub fn execute_check(args: &CheckArgs) -> Result<CheckReport> {
    info!("Checking report: {}", args.input.display());

    let input = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let run = decode_with(&input, &decode_options(args.lenient))
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    let canonical = encode(&run).context("Failed to re-encode report")?;
    debug!("Canonical form is {} bytes", canonical.len());

    let reparsed = decode(&canonical).context("Canonical form does not decode strictly")?;
    if reparsed != run {
        bail!("Canonical form decodes to a different report");
    }

    let report = CheckReport {
        summary: RunSummary::from_run(&run),
        canonical: canonical == input,
        bytes: input.len(),
    };

    info!("Check passed ({} bytes, canonical: {})", report.bytes, report.canonical);

    Ok(report)
}
