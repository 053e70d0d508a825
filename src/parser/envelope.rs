//! Generic GStreamer debug line envelope.
//!
//! A debug line looks like:
//! `0:00:01.000000000 12345 0x55d0c0 LOG GST_SCHEDULING gstpad.c:4320:...`
//! i.e. timestamp, process id, thread address, severity, then the message.

use once_cell::sync::Lazy;
use regex::Regex;

static ENVELOPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<ts>[\w:.]+)\s+(?P<pid>\w+)\s+(?P<thread>\w+)\s+(?P<level>\w+)\s+(?P<msg>.*)")
        .expect("Invalid envelope pattern")
});

/// The five fields every recognized line carries
///
/// Fields borrow from the input line; the timestamp is left as text
/// until a line turns out to contain an event of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEnvelope<'a> {
    pub timestamp: &'a str,
    pub pid: &'a str,
    pub thread_id: &'a str,
    pub severity: &'a str,
    pub message: &'a str,
}

/// Split a raw line into its envelope fields
///
/// **Public** - first step of line classification
///
/// Returns None for lines that are not debug output (pipeline chatter,
/// blank lines, application prints).
pub fn parse_envelope(line: &str) -> Option<LogEnvelope<'_>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let caps = ENVELOPE_RE.captures(line)?;

    Some(LogEnvelope {
        timestamp: caps.name("ts")?.as_str(),
        pid: caps.name("pid")?.as_str(),
        thread_id: caps.name("thread")?.as_str(),
        severity: caps.name("level")?.as_str(),
        message: caps.name("msg")?.as_str(),
    })
}
