//! Decoding of envelope messages into typed trace events.
//!
//! Two message shapes are of interest:
//! - `GST_SCHEDULING` handoffs, logged by `gst_pad_chain_data_unchecked`
//!   each time an element's chain function receives a buffer
//! - stage markers, logged by instrumented elements around the work done
//!   inside their own `gst_<name>_chain` function
//!
//! Everything else is noise and is dropped without error.

use super::envelope::parse_envelope;
use super::timestamp::LogTimestamp;
use crate::utils::config::{AnalyzerConfig, CHAIN_FUNCTION, SCHEDULING_CATEGORY};
use crate::utils::error::ParseError;
use log::trace;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Which side of the `<...>` pad identity carries the element name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadForm {
    /// `<element0:pad>`
    Sink,
    /// `<pad:element0>`
    Src,
}

/// One pipeline stage receiving one buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffEvent {
    pub timestamp: LogTimestamp,
    pub thread_id: String,
    pub stage_name: String,
    pub stage_instance: String,
    pub pad_name: String,
    pub pad_form: PadForm,
    pub buffer_id: String,
    /// Frame identity; kept as the raw token
    pub pts: String,
    pub dts: String,
    pub duration: String,
}

/// A stage-scoped begin/end boundary for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerEvent {
    pub timestamp: LogTimestamp,
    pub stage_name: String,
    /// Usually `started` or `finished`, but any word is accepted
    pub marker_kind: String,
    pub pts: String,
}

/// A decoded event of interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Handoff(HandoffEvent),
    Marker(MarkerEvent),
}

impl TraceEvent {
    pub fn timestamp(&self) -> LogTimestamp {
        match self {
            TraceEvent::Handoff(e) => e.timestamp,
            TraceEvent::Marker(e) => e.timestamp,
        }
    }

    pub fn pts(&self) -> &str {
        match self {
            TraceEvent::Handoff(e) => &e.pts,
            TraceEvent::Marker(e) => &e.pts,
        }
    }
}

fn handoff_pattern(pad_identity: &str) -> Regex {
    let pattern = format!(
        r"^{}\s+gstpad\.c:\w+:(?P<func>\w+):<{}> calling chainfunction &\w+ with buffer buffer: (?P<buffer>\w+), pts (?P<pts>[\w:.]+), dts (?P<dts>[\w:.]+), dur (?P<dur>[\w:.]+)",
        regex::escape(SCHEDULING_CATEGORY),
        pad_identity
    );
    Regex::new(&pattern).expect("Invalid handoff pattern")
}

/// Handoff patterns in the order they are tried; first match wins
static HANDOFF_PATTERNS: Lazy<Vec<(Regex, PadForm)>> = Lazy::new(|| {
    vec![
        (
            handoff_pattern(r"(?P<elem>[A-Za-z0-9_]+)(?P<num>[0-9]+):(?P<pad>\w+)"),
            PadForm::Sink,
        ),
        (
            handoff_pattern(r"(?P<pad>\w+):(?P<elem>[A-Za-z0-9_]+)(?P<num>[0-9]+)"),
            PadForm::Src,
        ),
    ]
});

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\w\s.:]+:<(?P<elem>[A-Za-z0-9_]+)>\s+gst_\w+_chain (?P<kind>\w+)[\w\s,]+pts\s+(?P<pts>[0-9:.]+)",
    )
    .expect("Invalid marker pattern")
});

/// Handoff fields borrowed from the message, before the timestamp is parsed
struct HandoffMatch<'a> {
    caps: Captures<'a>,
    pad_form: PadForm,
}

impl HandoffMatch<'_> {
    fn field(&self, name: &str) -> String {
        self.caps
            .name(name)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    fn into_event(self, timestamp: LogTimestamp, thread_id: &str) -> HandoffEvent {
        HandoffEvent {
            timestamp,
            thread_id: thread_id.to_string(),
            stage_name: self.field("elem"),
            stage_instance: self.field("num"),
            pad_name: self.field("pad"),
            pad_form: self.pad_form,
            buffer_id: self.field("buffer"),
            pts: self.field("pts"),
            dts: self.field("dts"),
            duration: self.field("dur"),
        }
    }
}

/// Turns raw log lines into trace events
///
/// **Public** - holds the exclusion set; classification itself is pure
#[derive(Debug, Clone)]
pub struct LineClassifier {
    config: AnalyzerConfig,
}

impl LineClassifier {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Classify one raw line
    ///
    /// **Public** - main entry point for line parsing
    ///
    /// # Returns
    /// Zero, one or two events. Lines that are not debug output, or whose
    /// message matches neither event shape, yield an empty vector.
    ///
    /// # Errors
    /// * `ParseError::MalformedTimestamp` - an event matched but the envelope
    ///   timestamp does not parse
    pub fn classify(&self, line: &str) -> Result<Vec<TraceEvent>, ParseError> {
        let Some(envelope) = parse_envelope(line) else {
            return Ok(Vec::new());
        };

        let handoff = self.match_handoff(envelope.message);
        let marker = MARKER_RE.captures(envelope.message);

        if handoff.is_none() && marker.is_none() {
            return Ok(Vec::new());
        }

        let timestamp = LogTimestamp::parse(envelope.timestamp)?;
        let mut events = Vec::with_capacity(2);

        if let Some(handoff) = handoff {
            events.push(TraceEvent::Handoff(
                handoff.into_event(timestamp, envelope.thread_id),
            ));
        }

        if let Some(caps) = marker {
            let field = |name: &str| {
                caps.name(name)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default()
            };
            events.push(TraceEvent::Marker(MarkerEvent {
                timestamp,
                stage_name: field("elem"),
                marker_kind: field("kind"),
                pts: field("pts"),
            }));
        }

        Ok(events)
    }

    /// Try each handoff pattern in order and apply the event filters
    ///
    /// **Private** - internal helper for classify
    fn match_handoff<'a>(&self, message: &'a str) -> Option<HandoffMatch<'a>> {
        let (caps, pad_form) = HANDOFF_PATTERNS
            .iter()
            .find_map(|(re, form)| re.captures(message).map(|caps| (caps, *form)))?;

        let func = caps.name("func").map(|m| m.as_str()).unwrap_or_default();
        if func != CHAIN_FUNCTION {
            trace!("Ignoring handoff logged from {}", func);
            return None;
        }

        let elem = caps.name("elem").map(|m| m.as_str()).unwrap_or_default();
        if self.config.is_excluded(elem) {
            trace!("Ignoring handoff for excluded element {}", elem);
            return None;
        }

        Some(HandoffMatch { caps, pad_form })
    }
}
