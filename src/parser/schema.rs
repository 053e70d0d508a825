//! Output JSON schema definitions for timing reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when report was generated
    pub generated_at: String,

    /// Input accounting for this run
    pub run: RunStats,

    /// One entry per frame, ascending by pts
    pub frames: Vec<FrameReport>,

    /// Averages across all frames
    pub summary: ReportSummary,
}

/// Counters collected while reading the log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub lines_read: u64,
    pub lines_with_events: u64,
    pub handoff_events: u64,
    pub marker_events: u64,
    pub malformed_lines: u64,
}

/// Timing breakdown for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    /// 1-based position in the report
    pub frame_number: usize,

    /// Presentation timestamp identifying the frame
    pub pts: String,

    /// Handoffs in the order they were logged
    pub entries: Vec<TimelineEntry>,

    /// Stage-local latencies measured from marker pairs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stage_latencies: Vec<StageLatency>,

    /// Microseconds between first and last handoff
    pub total_latency_us: i64,
}

/// One handoff within a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Wall-clock time, `HH:MM:SS.ffffff`
    pub at: String,

    /// Microseconds since the previous entry; None for the first
    pub delta_us: Option<i64>,

    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageLatency {
    pub stage: String,
    pub latency_us: i64,
}

/// Aggregate statistics over the whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Mean total latency over counted frames (None = no valid frames)
    pub average_latency_us: Option<i64>,

    /// Frames with a strictly positive total latency
    pub counted_frames: u64,

    /// Per-stage averages, sorted by stage name
    pub stages: Vec<StageSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage: String,
    pub average_latency_us: i64,
    pub frames: u64,
}
