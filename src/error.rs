//! Error handling for IMF processing operations.
//!
//! Parse failures carry the 1-based line number of the offending line so a
//! caller converting a whole archive can report exactly where a file broke.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Line {line} is too short to classify: {length} characters, need at least 30")]
    ShortLine { line: usize, length: usize },

    #[error("Invalid header on line {line}: {reason}")]
    HeaderFormat { line: usize, reason: String },

    #[error("Invalid data on line {line}: {reason}")]
    DataToken { line: usize, reason: String },

    #[error("Input not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Encoding failed: {reason}")]
    Encoding { reason: String },

    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl ImfError {
    pub fn header_format(line: usize, reason: impl Into<String>) -> Self {
        Self::HeaderFormat {
            line,
            reason: reason.into(),
        }
    }

    pub fn data_token(line: usize, reason: impl Into<String>) -> Self {
        Self::DataToken {
            line,
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn encoding(reason: impl Into<String>) -> Self {
        Self::Encoding {
            reason: reason.into(),
        }
    }

    /// Line number of a parse failure, `None` for every other kind.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ShortLine { line, .. }
            | Self::HeaderFormat { line, .. }
            | Self::DataToken { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImfError>;
