//! Error types for pixkit-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixkit_core::Error),

    /// Invalid structuring element
    #[error("invalid structuring element: {0}")]
    InvalidSel(String),

    /// A pixel of a binary image holds something other than 0 or 1
    #[error("not a binary image: value {value} at ({x}, {y})")]
    NotBinary { x: u32, y: u32, value: u8 },
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
