//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Core library error while building test inputs
    #[error("core error: {0}")]
    Core(#[from] pixkit_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
