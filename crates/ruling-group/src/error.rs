//! Error types for ruling-group

use ruling_core::Orientation;
use thiserror::Error;

/// Errors that can occur while grouping lines
#[derive(Debug, Error)]
pub enum GroupError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ruling_core::Error),

    /// A grouping setting is out of range or inconsistent
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    /// A line of the wrong orientation was passed in
    #[error("orientation mismatch: expected {expected:?} lines, got {actual:?}")]
    OrientationMismatch {
        expected: Orientation,
        actual: Orientation,
    },
}

/// Result type for grouping operations
pub type GroupResult<T> = Result<T, GroupError>;
