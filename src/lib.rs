//! GST Frame Timeline
//!
//! Reconstructs, per frame, how long each GStreamer pipeline stage
//! took to process it, from a captured debug log.
//!
//! This crate provides the core implementation for the
//! `gst-timeline` CLI tool.
//!
//! ## Getting Started
//!
//! Capture a log with scheduling traces enabled, then analyze it:
//!
//! ```bash
//! GST_DEBUG=*:2,GST_SCHEDULING:6,GST_PERFORMANCE:5 \
//!     gst-launch-1.0 --gst-debug-no-color -e [PIPELINE] > trace.log 2>&1
//! gst-timeline analyze trace.log
//! ```

pub mod aggregator;
pub mod commands;
pub mod input;
pub mod output;
pub mod parser;
pub mod utils;
