//! Error types for ruling-lines

use thiserror::Error;

/// Errors that can occur while finding lines
#[derive(Debug, Error)]
pub enum LineError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ruling_core::Error),

    /// An option or scan setting is out of range
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The raw line scanner failed; the message is the scanner's own
    #[error("{0}")]
    ScanFailure(String),
}

/// Result type for line-finding operations
pub type LineResult<T> = Result<T, LineError>;
