//! Error types for colour parsing.

use thiserror::Error;

/// Errors raised by the strict colour parsers.
#[derive(Debug, Error)]
pub enum ColorError {
    /// The input is not a 6 or 8 digit hexadecimal colour.
    #[error("invalid hex color format: {0:?}")]
    InvalidFormat(String),

    /// The hex pattern could not be compiled.
    #[error("failed to compile hex color pattern")]
    Pattern(#[from] regex::Error),
}

/// Result alias used by the colour parsers.
pub type Result<T> = std::result::Result<T, ColorError>;
