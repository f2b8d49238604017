//! Console-level error type.

use thiserror::Error;

/// Errors returned while reading an answer from the console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Input ended before an answer was given.
    #[error("console input closed")]
    Closed,

    /// An integer was expected.
    #[error("'{input}' is not a whole number")]
    NotANumber { input: String },

    /// A non-negative integer was expected.
    #[error("'{input}' must not be negative")]
    Negative { input: String },

    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}
