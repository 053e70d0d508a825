//! Turn grouped events into the final timing report.
//!
//! For every frame, in ascending pts order:
//! 1. Walk its handoffs and compute the delta to the previous one
//! 2. Compute the first-to-last total latency
//! 3. Look up start/stop marker pairs for that pts in every stage
//! 4. Feed positive values into the running averages

use super::metrics::AggregateStats;
use super::timeline::{FrameTimeline, StageMarkerLog, TimelineAggregator};
use crate::parser::schema::{FrameReport, RunStats, StageLatency, TimelineEntry, TimingReport};
use crate::parser::timestamp::LogTimestamp;
use crate::utils::config::SCHEMA_VERSION;
use log::debug;

/// Build the report for a finished run
///
/// **Public** - main entry point for report generation
///
/// # Arguments
/// * `aggregator` - Grouped events; consumed, as nothing is needed afterwards
/// * `run` - Input accounting collected while reading
pub fn build_report(aggregator: TimelineAggregator, run: RunStats) -> TimingReport {
    debug!("Building report for {} frames", aggregator.frame_count());

    let mut stats = AggregateStats::new();
    let frames: Vec<FrameReport> = aggregator
        .frames()
        .enumerate()
        .map(|(index, (pts, timeline))| {
            build_frame_report(index + 1, pts, timeline, aggregator.markers(), &mut stats)
        })
        .collect();

    TimingReport {
        version: SCHEMA_VERSION.to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        run,
        frames,
        summary: stats.to_summary(),
    }
}

/// Build one frame block and update the running averages
///
/// **Private** - internal helper for build_report
fn build_frame_report(
    frame_number: usize,
    pts: &str,
    timeline: &FrameTimeline,
    markers: &StageMarkerLog,
    stats: &mut AggregateStats,
) -> FrameReport {
    let mut previous: Option<LogTimestamp> = None;
    let entries: Vec<TimelineEntry> = timeline
        .entries()
        .iter()
        .map(|record| {
            let delta_us = previous.map(|prev| record.timestamp.micros_since(&prev));
            previous = Some(record.timestamp);
            TimelineEntry {
                at: record.timestamp.to_string(),
                delta_us,
                description: record.description.clone(),
            }
        })
        .collect();

    let total_latency_us = timeline.total_latency_us();
    if !stats.record_frame(total_latency_us) {
        debug!("Frame {} not counted (total {} us)", pts, total_latency_us);
    }

    let stage_latencies: Vec<StageLatency> = markers
        .stage_names()
        .filter_map(|stage| {
            let latency_us = markers.stage_latency_us(stage, pts)?;
            stats.record_stage(stage, latency_us);
            Some(StageLatency {
                stage: stage.to_string(),
                latency_us,
            })
        })
        .collect();

    FrameReport {
        frame_number,
        pts: pts.to_string(),
        entries,
        stage_latencies,
        total_latency_us,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::events::{HandoffEvent, MarkerEvent, PadForm, TraceEvent};
    use pretty_assertions::assert_eq;

    fn handoff(at: &str, stage: &str, pts: &str) -> TraceEvent {
        TraceEvent::Handoff(HandoffEvent {
            timestamp: LogTimestamp::parse(at).unwrap(),
            thread_id: "0xabc".to_string(),
            stage_name: stage.to_string(),
            stage_instance: "0".to_string(),
            pad_name: "sink".to_string(),
            pad_form: PadForm::Sink,
            buffer_id: "0x1".to_string(),
            pts: pts.to_string(),
            dts: "none".to_string(),
            duration: "none".to_string(),
        })
    }

    fn marker(at: &str, stage: &str, pts: &str) -> TraceEvent {
        TraceEvent::Marker(MarkerEvent {
            timestamp: LogTimestamp::parse(at).unwrap(),
            stage_name: stage.to_string(),
            marker_kind: "started".to_string(),
            pts: pts.to_string(),
        })
    }

    #[test]
    fn test_deltas_and_total() {
        let mut agg = TimelineAggregator::new();
        agg.ingest(handoff("00:00:01.000000", "queue", "A"));
        agg.ingest(handoff("00:00:01.000250", "decoder", "A"));
        agg.ingest(handoff("00:00:01.001000", "sink", "A"));

        let report = build_report(agg, RunStats::default());
        let frame = &report.frames[0];

        let deltas: Vec<Option<i64>> = frame.entries.iter().map(|e| e.delta_us).collect();
        assert_eq!(deltas, vec![None, Some(250), Some(750)]);
        assert_eq!(frame.total_latency_us, 1000);
        assert_eq!(report.summary.average_latency_us, Some(1000));
        assert_eq!(report.summary.counted_frames, 1);
    }

    #[test]
    fn test_single_entry_frame_not_counted() {
        let mut agg = TimelineAggregator::new();
        agg.ingest(handoff("00:00:01.000000", "queue", "A"));
        agg.ingest(handoff("00:00:01.000000", "queue", "B"));
        agg.ingest(handoff("00:00:01.000300", "sink", "B"));

        let report = build_report(agg, RunStats::default());
        assert_eq!(report.frames.len(), 2);
        assert_eq!(report.frames[0].total_latency_us, 0);
        assert_eq!(report.frames[1].frame_number, 2);
        assert_eq!(report.summary.average_latency_us, Some(300));
        assert_eq!(report.summary.counted_frames, 1);
    }

    #[test]
    fn test_stage_latency_attached_to_frame() {
        let mut agg = TimelineAggregator::new();
        agg.ingest(handoff("00:00:01.000000", "queue", "A"));
        agg.ingest(marker("00:00:01.000100", "decoder", "A"));
        agg.ingest(marker("00:00:01.005100", "decoder", "A"));
        agg.ingest(handoff("00:00:01.006000", "sink", "A"));
        // Orphaned: no handoff ever establishes frame "Z"
        agg.ingest(marker("00:00:02.000000", "decoder", "Z"));
        agg.ingest(marker("00:00:02.100000", "decoder", "Z"));

        let report = build_report(agg, RunStats::default());
        assert_eq!(report.frames.len(), 1);
        assert_eq!(
            report.frames[0].stage_latencies,
            vec![StageLatency {
                stage: "decoder".to_string(),
                latency_us: 5000
            }]
        );
        assert_eq!(report.summary.stages.len(), 1);
        assert_eq!(report.summary.stages[0].average_latency_us, 5000);
        assert_eq!(report.summary.stages[0].frames, 1);
    }

    #[test]
    fn test_no_valid_frames() {
        let report = build_report(TimelineAggregator::new(), RunStats::default());
        assert!(report.frames.is_empty());
        assert_eq!(report.summary.average_latency_us, None);
        assert_eq!(report.summary.counted_frames, 0);
    }
}
