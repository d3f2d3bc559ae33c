//! Error types for gosyn

use thiserror::Error;

/// Result type alias for gosyn operations
pub type Result<T> = std::result::Result<T, GosynError>;

/// gosyn error types
///
/// Malformed source input is never an error: unterminated strings and
/// comments are absorbed into the block state machine. Only startup
/// problems (bad patterns, bad theme, I/O) surface here.
#[derive(Error, Debug)]
pub enum GosynError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid highlight pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid theme: {0}")]
    Theme(String),

    #[error("{0}")]
    Usage(String),
}
