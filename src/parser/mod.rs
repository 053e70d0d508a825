//! Log line parsing and schema definitions.
//!
//! This module handles:
//! - Splitting raw lines into the debug envelope
//! - Decoding handoff and marker events
//! - Parsing envelope timestamps
//! - Defining output schema

pub mod envelope;
pub mod events;
pub mod schema;
pub mod timestamp;

// Re-export main types
pub use envelope::{parse_envelope, LogEnvelope};
pub use events::{HandoffEvent, LineClassifier, MarkerEvent, PadForm, TraceEvent};
pub use schema::{
    FrameReport, ReportSummary, RunStats, StageLatency, StageSummary, TimelineEntry, TimingReport,
};
pub use timestamp::LogTimestamp;
