//! Group decoded events by frame and by stage.
//!
//! Frames are keyed by the raw pts token. A frame exists only once a
//! handoff for it has been seen; marker events alone never create one.

use crate::parser::events::{HandoffEvent, MarkerEvent, TraceEvent};
use crate::parser::timestamp::LogTimestamp;
use log::trace;
use std::collections::{BTreeMap, HashMap};

/// One observed handoff for a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRecord {
    pub timestamp: LogTimestamp,
    pub description: String,
}

/// Handoffs for one frame, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameTimeline {
    entries: Vec<TimelineRecord>,
}

impl FrameTimeline {
    pub fn push(&mut self, timestamp: LogTimestamp, description: String) {
        self.entries.push(TimelineRecord {
            timestamp,
            description,
        });
    }

    pub fn entries(&self) -> &[TimelineRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Microseconds from first to last entry (0 for fewer than two)
    pub fn total_latency_us(&self) -> i64 {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => last.timestamp.micros_since(&first.timestamp),
            _ => 0,
        }
    }
}

/// One marker recorded for a (stage, frame) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerEntry {
    pub timestamp: LogTimestamp,
    pub stage_name: String,
    pub description: String,
}

/// Marker entries keyed by stage name, then by pts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageMarkerLog {
    stages: BTreeMap<String, HashMap<String, Vec<MarkerEntry>>>,
}

impl StageMarkerLog {
    pub fn push(&mut self, event: &MarkerEvent) {
        self.stages
            .entry(event.stage_name.clone())
            .or_default()
            .entry(event.pts.clone())
            .or_default()
            .push(MarkerEntry {
                timestamp: event.timestamp,
                stage_name: event.stage_name.clone(),
                description: describe_marker(event),
            });
    }

    /// Stage names in sorted order
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }

    /// Markers recorded for a (stage, frame) pair
    pub fn entries(&self, stage: &str, pts: &str) -> &[MarkerEntry] {
        self.stages
            .get(stage)
            .and_then(|frames| frames.get(pts))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Start-to-stop latency for a (stage, frame) pair
    ///
    /// The first two markers are start and stop; extra markers are
    /// ignored. Returns None when fewer than two were recorded.
    pub fn stage_latency_us(&self, stage: &str, pts: &str) -> Option<i64> {
        match self.entries(stage, pts) {
            [start, stop, ..] => Some(stop.timestamp.micros_since(&start.timestamp)),
            _ => None,
        }
    }
}

/// Owns all per-run grouping state
///
/// **Public** - constructed fresh for each run, consumed by the report builder
#[derive(Debug, Clone, Default)]
pub struct TimelineAggregator {
    frames: BTreeMap<String, FrameTimeline>,
    markers: StageMarkerLog,
}

impl TimelineAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one event into the frame or marker tables
    pub fn ingest(&mut self, event: TraceEvent) {
        trace!("Event at {} for pts {}", event.timestamp(), event.pts());

        match event {
            TraceEvent::Handoff(handoff) => {
                let description = describe_handoff(&handoff);
                self.frames
                    .entry(handoff.pts)
                    .or_default()
                    .push(handoff.timestamp, description);
            }
            TraceEvent::Marker(marker) => self.markers.push(&marker),
        }
    }

    /// Frames in ascending pts order
    pub fn frames(&self) -> impl Iterator<Item = (&str, &FrameTimeline)> {
        self.frames.iter().map(|(pts, tl)| (pts.as_str(), tl))
    }

    pub fn frame(&self, pts: &str) -> Option<&FrameTimeline> {
        self.frames.get(pts)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn markers(&self) -> &StageMarkerLog {
        &self.markers
    }
}

/// Render the description shown for a handoff
fn describe_handoff(event: &HandoffEvent) -> String {
    format!(
        "Buffer {:>14} Thread {:>14}: {}{}:{}",
        event.buffer_id, event.thread_id, event.stage_name, event.stage_instance, event.pad_name
    )
}

/// Render the description shown for a marker
fn describe_marker(event: &MarkerEvent) -> String {
    format!("{} {}, pts {:>4}", event.stage_name, event.marker_kind, event.pts)
}
