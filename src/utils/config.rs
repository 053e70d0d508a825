//! Configuration and constants for the analyzer.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Element excluded from frame timelines unless overridden
pub const DEFAULT_EXCLUDED_STAGE: &str = "mpeg2dec";

/// Debug category that carries buffer handoff lines
pub const SCHEDULING_CATEGORY: &str = "GST_SCHEDULING";

/// Only handoffs logged from this function are pushes into a chain function
pub const CHAIN_FUNCTION: &str = "gst_pad_chain_data_unchecked";

/// chrono format used to parse envelope timestamps
pub const TIMESTAMP_PARSE_FORMAT: &str = "%H:%M:%S%.f";

/// chrono format used to display timestamps (microsecond precision)
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%H:%M:%S%.6f";

/// Path argument meaning "read standard input"
pub const STDIN_PATH: &str = "-";

/// Runtime options for one analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Element names whose handoff events are ignored entirely
    pub excluded_stages: Vec<String>,

    /// Abort the run on a malformed timestamp instead of skipping the line
    pub strict_timestamps: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            excluded_stages: vec![DEFAULT_EXCLUDED_STAGE.to_string()],
            strict_timestamps: false,
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_excluded_stages<I, S>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_stages = stages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_strict_timestamps(mut self, strict: bool) -> Self {
        self.strict_timestamps = strict;
        self
    }

    /// Check whether handoffs from this element should be dropped
    pub fn is_excluded(&self, stage_name: &str) -> bool {
        self.excluded_stages.iter().any(|s| s == stage_name)
    }
}
