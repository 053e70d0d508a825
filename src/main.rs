//! GST Frame Timeline CLI
//!
//! Analyzes GStreamer debug logs and reports per-frame stage latency.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use gst_frame_timeline::commands::{
    display_schema, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs,
};
use gst_frame_timeline::utils::config::{AnalyzerConfig, DEFAULT_EXCLUDED_STAGE};

/// GST Frame Timeline - per-frame pipeline timing from debug logs
#[derive(Parser, Debug)]
#[command(name = "gst-timeline")]
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
    /// Analyze a captured log (stdin when no files are given)
    Analyze {
        /// Log files, read in order ("-" for stdin)
        files: Vec<PathBuf>,

        /// Element name whose handoffs are ignored (repeatable)
        #[arg(
            short,
            long = "exclude",
            env = "GST_TIMELINE_EXCLUDE",
            value_delimiter = ',',
            default_value = DEFAULT_EXCLUDED_STAGE
        )]
        exclude: Vec<String>,

        /// Keep handoffs from every element, ignoring --exclude
        #[arg(long)]
        no_exclude: bool,

        /// Output path for JSON report
        #[arg(long)]
        json: Option<PathBuf>,

        /// Output path for text report
        #[arg(long)]
        text: Option<PathBuf>,

        /// Abort on malformed timestamps instead of skipping the line
        #[arg(long)]
        strict: bool,

        /// Do not print the report to stdout
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging (stderr, so the report on stdout stays clean)
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            files,
            exclude,
            no_exclude,
            json,
            text,
            strict,
            quiet,
        } => {
            let excluded = if no_exclude { Vec::new() } else { exclude };
            let config = AnalyzerConfig::new()
                .with_excluded_stages(excluded)
                .with_strict_timestamps(strict);

            let args = AnalyzeArgs {
                inputs: files,
                config,
                output_json: json,
                output_text: text,
                print_report: !quiet,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
