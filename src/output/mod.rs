//! Output writers for timing reports.
//!
//! This module handles writing data to disk in various formats:
//! - JSON reports (pretty)
//! - Text reports in the classic frame-by-frame layout

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{read_report, validate_path, write_report};
pub use text::{render_text_report, write_text_report};
