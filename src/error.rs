//! Centralized error handling for ledgerlens.
//!
//! A run either completes and writes every report for the requested
//! analysis, or fails outright: all errors propagate to `main` uncaught and
//! terminate the process with a non-zero exit code and a descriptive
//! message. There is no retry logic and no partial-success mode.
//!
//! The `ResultExt` trait adds a `.context()` method to any `Result` for
//! attaching contextual information to errors as they bubble up:
//!
//! ```no_run
//! use ledgerlens::error::ResultExt as _;
//! use std::fs;
//!
//! fn load_notes() -> ledgerlens::error::Result<String> {
//!     let content = fs::read_to_string("notes.txt").context("Failed to load notes")?;
//!     Ok(content)
//! }
//! ```

use std::fmt;

/// Main error type for ledgerlens operations.
#[derive(Debug)]
pub enum LedgerlensError {
    /// I/O errors (file operations)
    Io(std::io::Error),

    /// Input file missing or unreadable
    InputNotFound(String),

    /// Explicitly requested column absent from the table
    ColumnNotFound(String),

    /// Explicitly requested column present but not numeric-typed
    ColumnNotNumeric(String),

    /// Auto-selection found no qualifying numeric column
    Selection(String),

    /// Selected column yielded zero usable leading digits
    EmptyColumn(String),

    /// Data processing errors (Polars, parsing, etc.)
    DataProcessing(String),

    /// Configuration errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for LedgerlensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InputNotFound(msg) => write!(f, "Input file not found: {msg}"),
            Self::ColumnNotFound(msg) => write!(f, "Column not found: {msg}"),
            Self::ColumnNotNumeric(msg) => write!(f, "Column is not numeric: {msg}"),
            Self::Selection(msg) => write!(f, "Column selection failed: {msg}"),
            Self::EmptyColumn(msg) => write!(f, "Empty column: {msg}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for LedgerlensError {}

impl From<std::io::Error> for LedgerlensError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for LedgerlensError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerlensError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for LedgerlensError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for ledgerlens operations.
pub type Result<T> = std::result::Result<T, LedgerlensError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<LedgerlensError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: LedgerlensError = e.into();
            LedgerlensError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: LedgerlensError = e.into();
            LedgerlensError::Other(format!("{}: {}", f(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerlensError::ColumnNotFound("'Amount' is not a header".to_owned());
        assert_eq!(err.to_string(), "Column not found: 'Amount' is not a header");

        let err = LedgerlensError::Selection("no qualifying column".to_owned());
        assert_eq!(err.to_string(), "Column selection failed: no qualifying column");
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file.txt",
        ));

        let result: Result<()> = result.context("Failed to read file");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read file")
        );
    }
}
