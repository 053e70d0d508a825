use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Lines Read: {}", report.run.lines_read);
    println!("  Frames: {}", report.frames.len());
    match report.summary.average_latency_us {
        Some(avg) => println!(
            "  Average Latency: {} us on {} frames",
            avg, report.summary.counted_frames
        ),
        None => println!("  Average Latency: no valid frames"),
    }
    println!("  Stages: {}", report.summary.stages.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("GST Frame Timeline Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string             - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string        - ISO 8601 timestamp");
        println!("  run: object                 - Input accounting");
        println!("    lines_read: number        - Raw lines consumed");
        println!("    lines_with_events: number - Lines that produced events");
        println!("    handoff_events: number    - Buffer handoffs kept");
        println!("    marker_events: number     - Stage markers kept");
        println!("    malformed_lines: number   - Lines skipped for bad timestamps");
        println!("  frames: array               - One block per pts, ascending");
        println!("    frame_number: number      - 1-based position");
        println!("    pts: string               - Presentation timestamp");
        println!("    entries: array            - Handoffs in log order");
        println!("      at: string              - HH:MM:SS.ffffff");
        println!("      delta_us: number?       - Since previous entry (null for first)");
        println!("      description: string     - Buffer, thread, element and pad");
        println!("    stage_latencies: array?   - Marker start/stop deltas");
        println!("    total_latency_us: number  - First to last handoff");
        println!("  summary: object             - Averages over positive totals");
        println!("    average_latency_us: number?");
        println!("    counted_frames: number");
        println!("    stages: array             - stage, average_latency_us, frames");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("GST Frame Timeline v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Per-frame pipeline stage timing from GStreamer debug logs.");
}
