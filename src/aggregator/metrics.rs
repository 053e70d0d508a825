//! Running latency averages across frames and stages.
//!
//! Only strictly positive latencies count. A zero or negative value
//! usually means a single-event frame or clock reordering in the log,
//! and would drag the mean toward zero.

use crate::parser::schema::{ReportSummary, StageSummary};
use log::debug;
use std::collections::BTreeMap;

/// Sum and count of accepted latency samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyAccumulator {
    pub total_us: i64,
    pub count: u64,
}

impl LatencyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample if it is positive
    ///
    /// Returns whether the sample was counted.
    pub fn record(&mut self, latency_us: i64) -> bool {
        if latency_us <= 0 {
            return false;
        }
        self.total_us = self.total_us.saturating_add(latency_us);
        self.count += 1;
        true
    }

    /// Mean in whole microseconds (floor)
    pub fn mean(&self) -> Option<i64> {
        if self.count == 0 {
            return None;
        }
        i64::try_from(self.count)
            .ok()
            .map(|count| self.total_us.div_euclid(count))
    }
}

/// Aggregate statistics for a run
///
/// **Public** - mutated as each frame is finalized, read once at the end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Total frame latency
    pub frames: LatencyAccumulator,

    /// Per-stage marker latency, keyed by stage name
    pub stages: BTreeMap<String, LatencyAccumulator>,
}

impl AggregateStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, total_us: i64) -> bool {
        self.frames.record(total_us)
    }

    pub fn record_stage(&mut self, stage: &str, latency_us: i64) -> bool {
        if latency_us <= 0 {
            return false;
        }
        self.stages
            .entry(stage.to_string())
            .or_default()
            .record(latency_us)
    }

    /// Convert to the report summary
    ///
    /// Stages without any counted sample are omitted.
    pub fn to_summary(&self) -> ReportSummary {
        let stages: Vec<StageSummary> = self
            .stages
            .iter()
            .filter_map(|(stage, acc)| {
                acc.mean().map(|average| StageSummary {
                    stage: stage.clone(),
                    average_latency_us: average,
                    frames: acc.count,
                })
            })
            .collect();

        debug!(
            "Summary: {} counted frames, {} stages with data",
            self.frames.count,
            stages.len()
        );

        ReportSummary {
            average_latency_us: self.frames.mean(),
            counted_frames: self.frames.count,
            stages,
        }
    }
}
