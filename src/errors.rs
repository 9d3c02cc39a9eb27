/*!
 * Error types for the subclip application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating the subtitle/media selection
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// No subtitle file was selected
    #[error("No subtitle files selected")]
    EmptySubtitles,

    /// No media file was selected
    #[error("No media files selected")]
    EmptyMedia,

    /// The two lists cannot be paired positionally
    #[error("Selection mismatch: {subtitles} subtitle file(s) but {media} media file(s)")]
    LengthMismatch {
        subtitles: usize,
        media: usize,
    },

    /// A wildcard pattern could not be expanded
    #[error("Invalid selection pattern '{pattern}': {message}")]
    InvalidPattern {
        pattern: String,
        message: String,
    },
}

/// Errors raised while parsing timestamps and offsets
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimeError {
    /// Timestamp is not `H:MM:SS.mmm` or has out of range components
    #[error("Invalid timestamp: '{0}'")]
    InvalidTimestamp(String),

    /// Offset is not `[-]HH:MM:SS.mmm`
    #[error("Invalid offset: '{0}' (expected [-]HH:MM:SS.mmm)")]
    InvalidOffset(String),
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Extension is neither `srt`, `ass` nor `ssa`
    #[error("Unsupported subtitle format: {0:?}")]
    UnsupportedFormat(PathBuf),

    /// Subtitle file could not be read
    #[error("Failed to read subtitle file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A timestamp inside the file is malformed
    #[error("Invalid timestamp on line {line}: {source}")]
    InvalidTimestamp {
        line: usize,
        #[source]
        source: TimeError,
    },

    /// A line is recognised as a cue but lacks required fields
    #[error("Malformed cue on line {line}: {message}")]
    MalformedLine {
        line: usize,
        message: String,
    },
}

/// Errors reported by an extraction driver
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The extraction tool could not be started
    #[error("Failed to run {program}: {message}")]
    Spawn {
        program: String,
        message: String,
    },

    /// The extraction tool exited with a non-zero status
    #[error("Extraction failed with status {status:?}: {diagnostics}")]
    Failed {
        status: Option<i32>,
        diagnostics: String,
    },

    /// The extraction tool did not finish in time
    #[error("Extraction timed out after {0}s")]
    TimedOut(u64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from input selection
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from timestamp handling
    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    /// Error from the extraction tool
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
