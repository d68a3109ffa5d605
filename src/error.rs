//! Error types for the snowcascade library.
//!
//! All fallible operations return [`CascadeError`] through the crate-wide
//! [`Result`] alias. Every error carries a coarse [`ErrorCode`] so that a host
//! engine can surface it as a status code plus the `Display` message.
//!
//! # Examples
//!
//! ```
//! use snowcascade::error::{CascadeError, ErrorCode, Result};
//!
//! fn build() -> Result<()> {
//!     Err(CascadeError::configuration("unknown stemmer language 'klingon'"))
//! }
//!
//! let err = build().unwrap_err();
//! assert_eq!(err.code(), ErrorCode::Configuration);
//! ```

use std::io;

use thiserror::Error;

/// The main error type for snowcascade operations.
#[derive(Error, Debug)]
pub enum CascadeError {
    /// Bad or unsupported construction parameter. Fatal at construction time.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure reported by a delegate tokenizer or a token sink.
    #[error("Delegate error: {0}")]
    Delegate(String),

    /// The stop-word store could not be consulted.
    #[error("Stop word lookup failed: {0}")]
    StopWordLookupFailed(String),

    /// Configured stemmer settings differ from the persisted index state.
    #[error("Settings mismatch: {0}")]
    SettingsMismatch(String),

    /// Compression or decompression failure.
    #[error("Compression error: {0}")]
    Compression(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Status code reported to the host engine alongside an error message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Configuration,
    Delegate,
    StopWordLookup,
    Mismatch,
    Compression,
    Io,
    Internal,
}

/// Result type alias for operations that may fail with CascadeError.
pub type Result<T> = std::result::Result<T, CascadeError>;

impl CascadeError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        CascadeError::Configuration(msg.into())
    }

    /// Create a new delegate error.
    pub fn delegate<S: Into<String>>(msg: S) -> Self {
        CascadeError::Delegate(msg.into())
    }

    /// Create a new stop word lookup error.
    pub fn stop_word_lookup<S: Into<String>>(msg: S) -> Self {
        CascadeError::StopWordLookupFailed(msg.into())
    }

    /// Create a new settings mismatch error.
    pub fn settings_mismatch<S: Into<String>>(msg: S) -> Self {
        CascadeError::SettingsMismatch(msg.into())
    }

    /// Create a new compression error.
    pub fn compression<S: Into<String>>(msg: S) -> Self {
        CascadeError::Compression(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        CascadeError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        CascadeError::Configuration(format!("Invalid argument: {}", msg.into()))
    }

    /// Status code for the host engine.
    pub fn code(&self) -> ErrorCode {
        match self {
            CascadeError::Configuration(_) => ErrorCode::Configuration,
            CascadeError::Delegate(_) => ErrorCode::Delegate,
            CascadeError::StopWordLookupFailed(_) => ErrorCode::StopWordLookup,
            CascadeError::SettingsMismatch(_) => ErrorCode::Mismatch,
            CascadeError::Compression(_) => ErrorCode::Compression,
            CascadeError::Io(_) => ErrorCode::Io,
            CascadeError::Json(_) => ErrorCode::Configuration,
            CascadeError::Other(_) | CascadeError::Anyhow(_) => ErrorCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = CascadeError::configuration("empty language list");
        assert_eq!(
            error.to_string(),
            "Configuration error: empty language list"
        );

        let error = CascadeError::delegate("tokenizer exploded");
        assert_eq!(error.to_string(), "Delegate error: tokenizer exploded");

        let error = CascadeError::invalid_argument("min_token_length");
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid argument: min_token_length"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CascadeError::stop_word_lookup("no table").code(),
            ErrorCode::StopWordLookup
        );
        assert_eq!(
            CascadeError::settings_mismatch("languages").code(),
            ErrorCode::Mismatch
        );
        assert_eq!(CascadeError::other("x").code(), ErrorCode::Internal);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = CascadeError::from(io_error);

        match error {
            CascadeError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
        assert_eq!(
            CascadeError::from(io::Error::other("x")).code(),
            ErrorCode::Io
        );
    }
}
