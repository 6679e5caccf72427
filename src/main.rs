//! nmap-report CLI
//!
//! Checks nmap XML reports for lossless round-tripping and converts them
//! to canonical XML or a JSON export.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use nmap_report::commands::{
    execute_check, execute_convert, CheckArgs, ConvertArgs, OutputFormat,
};
use nmap_report::utils::config::{EXPORT_SCHEMA_VERSION, LENIENT_ENV};

/// nmap-report - typed, lossless codec for nmap XML reports
#[derive(Parser, Debug)]
#[command(name = "nmap-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a report and verify it round-trips
    Check {
        /// Path to the XML report
        file: PathBuf,

        /// Accept pretty-printed reports and skip unknown content
        #[arg(long, env = LENIENT_ENV)]
        lenient: bool,
    },

    /// Re-encode a report as canonical XML or export it as JSON
    Convert {
        /// Path to the XML report
        file: PathBuf,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Xml)]
        format: OutputFormat,

        /// Accept pretty-printed reports and skip unknown content
        #[arg(long, env = LENIENT_ENV)]
        lenient: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Check { file, lenient } => {
            let args = CheckArgs {
                input: file,
                lenient,
            };
            let report = execute_check(&args)?;

            println!("✓ Valid report: {}", args.input.display());
            println!(
                "  Size: {} bytes ({})",
                report.bytes,
                if report.canonical {
                    "canonical"
                } else {
                    "not canonical"
                }
            );
            println!("{}", report.summary);
        }

        Commands::Convert {
            file,
            output,
            format,
            lenient,
        } => {
            let args = ConvertArgs {
                input: file,
                output,
                format,
                lenient,
            };
            execute_convert(&args)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("nmap-report v{}", env!("CARGO_PKG_VERSION"));
    println!("JSON export schema: v{}", EXPORT_SCHEMA_VERSION);
    println!();
    println!("Typed, lossless codec for nmap XML scan reports.");
}
