//! Wall-clock timestamps from the log envelope.
//!
//! GStreamer prints running time as `H:MM:SS.nnnnnnnnn`. We keep
//! microsecond precision, which is what every delta is reported in.

use crate::utils::config::{TIMESTAMP_DISPLAY_FORMAT, TIMESTAMP_PARSE_FORMAT};
use crate::utils::error::ParseError;
use chrono::{NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// chrono alone accepts a missing fraction and single-digit minutes/seconds
static TIMESTAMP_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}:\d{2}\.\d+$").expect("Invalid timestamp pattern"));

/// A log timestamp truncated to whole microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogTimestamp {
    time: NaiveTime,
}

impl LogTimestamp {
    /// Parse an envelope timestamp token
    ///
    /// **Public** - used by the line classifier
    ///
    /// # Errors
    /// * `ParseError::MalformedTimestamp` - token is not `H:MM:SS.fraction`
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        if !TIMESTAMP_SHAPE_RE.is_match(token) {
            return Err(ParseError::MalformedTimestamp {
                token: token.to_string(),
                source: None,
            });
        }

        let time = NaiveTime::parse_from_str(token, TIMESTAMP_PARSE_FORMAT).map_err(|source| {
            ParseError::MalformedTimestamp {
                token: token.to_string(),
                source: Some(source),
            }
        })?;

        // Drop sub-microsecond digits
        let truncated = time.nanosecond() / 1_000 * 1_000;
        let time = time.with_nanosecond(truncated).unwrap_or(time);

        Ok(Self { time })
    }

    /// Signed elapsed microseconds from `earlier` to `self`
    pub fn micros_since(&self, earlier: &LogTimestamp) -> i64 {
        self.time
            .signed_duration_since(earlier.time)
            .num_microseconds()
            .unwrap_or_default()
    }
}

impl fmt::Display for LogTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time.format(TIMESTAMP_DISPLAY_FORMAT))
    }
}
