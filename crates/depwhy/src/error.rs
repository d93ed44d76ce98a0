//! Error types for depwhy operations.
//!
//! The traversal engine in [`crate::graph`] is total: every query returns an
//! empty result instead of failing. Errors only come from the layers around it:
//!
//! - **Input problems**: malformed graph text, unreadable files, bad config
//! - **Precondition violations**: no root modules to start from
//!
//! Truncation of a bounded search is reported on the result, never as an error.

use thiserror::Error;

/// Result type for depwhy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for depwhy operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of graph input could not be understood
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number in the input
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a parse error for the given 1-based line number.
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
