//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ruling_core::Error),

    /// A fixture was described with impossible geometry
    #[error("invalid fixture '{name}': {message}")]
    InvalidFixture { name: String, message: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
