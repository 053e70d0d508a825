//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while classifying log lines
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed timestamp '{token}', expected HH:MM:SS.ffffff")]
    MalformedTimestamp {
        token: String,
        #[source]
        source: Option<chrono::ParseError>,
    },
}

/// Errors that can occur while reading raw log input
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to open {}: {}", .path.display(), .source)]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input: {0}")]
    ReadFailed(#[from] std::io::Error),
}

/// Errors that abort an analysis run
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Line {line_number}: {source}")]
    Parse {
        line_number: u64,
        #[source]
        source: ParseError,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
