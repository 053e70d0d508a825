//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod utils;

// Re-export main command functions
pub use analyze::{analyze_lines, analyze_source, execute_analyze, validate_args, AnalyzeArgs};
pub use utils::{display_schema, display_version, validate_report_file};
