//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads raw log lines from stdin or files
//! 2. Classifies each line into trace events
//! 3. Groups events by frame and stage
//! 4. Builds the timing report
//! 5. Prints and/or writes the report

use crate::aggregator::{build_report, TimelineAggregator};
use crate::input::LineSource;
use crate::output::{render_text_report, validate_path, write_report, write_text_report};
use crate::parser::events::{LineClassifier, TraceEvent};
use crate::parser::schema::{RunStats, TimingReport};
use crate::utils::config::AnalyzerConfig;
use crate::utils::error::{AnalyzeError, InputError};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Log files to read in order (empty = stdin)
    pub inputs: Vec<PathBuf>,

    /// Classifier and error-handling options
    pub config: AnalyzerConfig,

    /// Output path for JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for text report (optional)
    pub output_text: Option<PathBuf>,

    /// Print the text report to stdout
    pub print_report: bool,
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input files that cannot be opened or read
/// * Malformed timestamps when strict mode is on
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<TimingReport> {
    let start_time = Instant::now();

    info!("Step 1/3: Opening log input...");
    let source = LineSource::open(&args.inputs).context("Failed to open log input")?;

    info!("Step 2/3: Reconstructing frame timelines...");
    let report = analyze_source(source, &args.config).context("Failed to analyze log")?;

    info!(
        "Found {} frames ({} with positive latency)",
        report.frames.len(),
        report.summary.counted_frames
    );

    info!("Step 3/3: Writing output...");

    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write JSON report")?;
        info!("✓ JSON report written to: {}", path.display());
    }

    if let Some(path) = &args.output_text {
        write_text_report(&report, path).context("Failed to write text report")?;
        info!("✓ Text report written to: {}", path.display());
    }

    if args.print_report {
        println!("{}", render_text_report(&report));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Run the classify/aggregate pipeline over a line source
///
/// **Public** - library entry point, no file output
///
/// # Errors
/// * `AnalyzeError::Input` - reading a line failed
/// * `AnalyzeError::Parse` - malformed timestamp with `strict_timestamps` set
pub fn analyze_source<I>(lines: I, config: &AnalyzerConfig) -> Result<TimingReport, AnalyzeError>
where
    I: IntoIterator<Item = Result<String, InputError>>,
{
    let classifier = LineClassifier::new(config);
    let mut aggregator = TimelineAggregator::new();
    let mut run = RunStats::default();

    for line in lines {
        let line = line?;
        run.lines_read += 1;

        let events = match classifier.classify(&line) {
            Ok(events) => events,
            Err(source) if config.strict_timestamps => {
                return Err(AnalyzeError::Parse {
                    line_number: run.lines_read,
                    source,
                });
            }
            Err(e) => {
                warn!("Skipping line {}: {}", run.lines_read, e);
                run.malformed_lines += 1;
                continue;
            }
        };

        if events.is_empty() {
            continue;
        }
        run.lines_with_events += 1;

        for event in events {
            match &event {
                TraceEvent::Handoff(_) => run.handoff_events += 1,
                TraceEvent::Marker(_) => run.marker_events += 1,
            }
            aggregator.ingest(event);
        }
    }

    debug!(
        "Read {} lines: {} handoffs, {} markers, {} malformed",
        run.lines_read, run.handoff_events, run.marker_events, run.malformed_lines
    );

    Ok(build_report(aggregator, run))
}

/// Run the pipeline over in-memory lines
///
/// **Public** - convenience wrapper used by tests and embedders
pub fn analyze_lines<I, S>(lines: I, config: &AnalyzerConfig) -> Result<TimingReport, AnalyzeError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    analyze_source(
        lines.into_iter().map(|l| Ok::<String, InputError>(l.into())),
        config,
    )
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.config.excluded_stages.iter().any(|s| s.trim().is_empty()) {
        anyhow::bail!("Excluded stage names cannot be empty");
    }

    for path in [&args.output_json, &args.output_text].into_iter().flatten() {
        validate_path(path).with_context(|| format!("Invalid output path {}", path.display()))?;
    }

    if !args.print_report && args.output_json.is_none() && args.output_text.is_none() {
        anyhow::bail!("Nothing to do: --quiet without --json or --text");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE_A: &str = "0:00:01.000000000 4242 0x1d2e3f0 LOG GST_SCHEDULING gstpad.c:4320:gst_pad_chain_data_unchecked:<sink1:sinkpad> calling chainfunction &gst_base_sink_chain with buffer buffer: 0x7f00aa, pts 0:00:00.033000000, dts 99:99:99.999999999, dur 0:00:00.033333333";

    #[test]
    fn test_validate_args_valid() {
        let args = AnalyzeArgs {
            print_report: true,
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_exclusion() {
        let args = AnalyzeArgs {
            config: AnalyzerConfig::new().with_excluded_stages([" "]),
            print_report: true,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_nothing_to_do() {
        let args = AnalyzeArgs::default();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_malformed_line_skipped_by_default() {
        let bad = LINE_A.replacen("0:00:01.000000000", "bogus", 1);
        let report = analyze_lines([bad.as_str(), LINE_A], &AnalyzerConfig::default()).unwrap();

        assert_eq!(report.run.lines_read, 2);
        assert_eq!(report.run.malformed_lines, 1);
        assert_eq!(report.run.handoff_events, 1);
        assert_eq!(report.frames.len(), 1);
    }

    #[test]
    fn test_malformed_line_aborts_in_strict_mode() {
        let bad = LINE_A.replacen("0:00:01.000000000", "bogus", 1);
        let config = AnalyzerConfig::new().with_strict_timestamps(true);

        let err = analyze_lines([LINE_A, bad.as_str()], &config).unwrap_err();
        assert!(matches!(err, AnalyzeError::Parse { line_number: 2, .. }));
    }
}
