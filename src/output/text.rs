//! Plain-text timing report.
//!
//! Layout per frame:
//! ```text
//! *** Frame no: 1, timestamp: 0:00:00.033333333
//! At 00:00:01.000000 (    first event) Buffer ... : queue0:sink
//! At 00:00:01.000250 (   250 us later) Buffer ... : decoder0:sink
//! decoder time 180 us
//! *** Total:    250 us
//! ```
//! followed by the `=-=` summary lines.

use super::json::{create_parent_dirs, validate_path};
use crate::parser::schema::{FrameReport, TimingReport};
use crate::utils::error::OutputError;
use log::info;
use std::path::Path;

const FIRST_EVENT_LABEL: &str = "(    first event)";

/// Render the full report as text
///
/// **Public** - used for stdout display and the text file writer
pub fn render_text_report(report: &TimingReport) -> String {
    let mut lines = Vec::new();

    for frame in &report.frames {
        render_frame(frame, &mut lines);
    }

    lines.push(String::new());
    match report.summary.average_latency_us {
        Some(average) => lines.push(format!(
            "=-= Average: {:6} us on {} frames",
            average, report.summary.counted_frames
        )),
        None => lines.push("=-= No valid frames".to_string()),
    }

    for stage in &report.summary.stages {
        lines.push(format!(
            "=-= {}: {:6} us on {} frames",
            stage.stage, stage.average_latency_us, stage.frames
        ));
    }

    lines.join("\n")
}

/// Render one frame block
///
/// **Private** - internal helper for render_text_report
fn render_frame(frame: &FrameReport, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push(format!(
        "*** Frame no: {}, timestamp: {}",
        frame.frame_number, frame.pts
    ));

    for entry in &frame.entries {
        let later = match entry.delta_us {
            Some(delta) => format!("({:6} us later)", delta),
            None => FIRST_EVENT_LABEL.to_string(),
        };
        lines.push(format!("At {} {} {}", entry.at, later, entry.description));
    }

    for stage in &frame.stage_latencies {
        lines.push(format!("{} time {} us", stage.stage, stage.latency_us));
    }

    lines.push(format!("*** Total: {:6} us", frame.total_latency_us));
}

/// Write the rendered text report to a file
///
/// **Public** - optional second output next to stdout
pub fn write_text_report(
    report: &TimingReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing text report to: {}", output_path.display());

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let mut text = render_text_report(report);
    text.push('\n');
    std::fs::write(output_path, text).map_err(OutputError::WriteFailed)?;

    Ok(())
}
