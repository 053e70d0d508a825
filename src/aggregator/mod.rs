//! Aggregation of trace events into per-frame timelines and metrics.
//!
//! This module transforms decoded events into:
//! - Frame timelines (handoffs grouped by pts)
//! - Stage marker logs (start/stop pairs per stage and pts)
//! - Latency averages and the final report

pub mod metrics;
pub mod report_builder;
pub mod timeline;

// Re-export main types and functions
pub use metrics::{AggregateStats, LatencyAccumulator};
pub use report_builder::build_report;
pub use timeline::{FrameTimeline, MarkerEntry, StageMarkerLog, TimelineAggregator, TimelineRecord};
