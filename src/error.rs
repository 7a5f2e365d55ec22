//! Error types for the spelldict library.
//!
//! Every failure in the compiler is represented by [`SpellDictError`]. The
//! binary collapses all of them into a non-zero exit status, but the variants
//! keep enough detail for a useful diagnostic.
//!
//! # Examples
//!
//! ```
//! use spelldict::error::{Result, SpellDictError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpellDictError::format(1, 4, "expected a space after the frequency"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for spelldict operations.
#[derive(Error, Debug)]
pub enum SpellDictError {
    /// I/O errors not attributed to a more specific stage
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input or output could not be acquired (open, metadata, mmap, short read)
    #[error("Resource error: {0}")]
    Resource(String),

    /// Malformed source text
    #[error("Format error at line {line}, column {column}: {reason}")]
    Format {
        line: usize,
        column: usize,
        reason: String,
    },

    /// Failed write or seek while emitting the binary dictionary
    #[error("Write error: {0}")]
    Write(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SpellDictError.
pub type Result<T> = std::result::Result<T, SpellDictError>;

impl SpellDictError {
    /// Create a new resource error.
    pub fn resource<S: Into<String>>(msg: S) -> Self {
        SpellDictError::Resource(msg.into())
    }

    /// Create a new format error at the given 1-based line and column.
    pub fn format<S: Into<String>>(line: usize, column: usize, reason: S) -> Self {
        SpellDictError::Format {
            line,
            column,
            reason: reason.into(),
        }
    }

    /// Create a new write error.
    pub fn write<S: Into<String>>(msg: S) -> Self {
        SpellDictError::Write(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SpellDictError::Config(msg.into())
    }

    /// Whether this error was caused by malformed source text.
    pub fn is_format(&self) -> bool {
        matches!(self, SpellDictError::Format { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SpellDictError::resource("cannot map input");
        assert_eq!(error.to_string(), "Resource error: cannot map input");

        let error = SpellDictError::format(3, 4, "expected a space");
        assert_eq!(
            error.to_string(),
            "Format error at line 3, column 4: expected a space"
        );
        assert!(error.is_format());

        let error = SpellDictError::write("seek failed");
        assert_eq!(error.to_string(), "Write error: seek failed");
        assert!(!error.is_format());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = SpellDictError::from(io_error);

        match error {
            SpellDictError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
