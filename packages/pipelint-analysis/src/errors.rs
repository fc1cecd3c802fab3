//! Error types for pipelint-analysis
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

/// Main error type for pipeline analysis operations
#[derive(Debug, Error)]
pub enum PipelintError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed pipeline definition)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(String),
}

impl PipelintError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        PipelintError::Parse(msg.into())
    }

    /// Create an analysis error
    pub fn analysis(msg: impl Into<String>) -> Self {
        PipelintError::Analysis(msg.into())
    }
}

/// Result type alias for pipeline analysis operations
pub type Result<T> = std::result::Result<T, PipelintError>;
