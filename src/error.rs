//! Error types for the Emosi library.
//!
//! All errors are represented by the [`EmosiError`] enum. Startup failures
//! (artifacts, configuration) and request failures (analysis, prediction)
//! share the same type so that both the CLI and the HTTP edge can report them
//! uniformly.
//!
//! # Examples
//!
//! ```
//! use emosi::error::{EmosiError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(EmosiError::invalid_argument("text must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Emosi operations.
#[derive(Error, Debug)]
pub enum EmosiError {
    /// I/O errors (artifact files, sockets, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Artifact loading or validation errors. Fatal at startup.
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Analysis-related errors (normalization, stemming, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Prediction-related errors (vectorizing, classifying)
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Invalid argument supplied by a caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid regular expression
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bincode decoding errors
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::error::DecodeError),
}

/// Result type alias for operations that may fail with EmosiError.
pub type Result<T> = std::result::Result<T, EmosiError>;

impl EmosiError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EmosiError::Config(msg.into())
    }

    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        EmosiError::Artifact(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        EmosiError::Analysis(msg.into())
    }

    /// Create a new prediction error.
    pub fn prediction<S: Into<String>>(msg: S) -> Self {
        EmosiError::Prediction(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        EmosiError::InvalidArgument(msg.into())
    }

    /// Whether this error happened while bringing the service up, as opposed
    /// to while serving a single request.
    pub fn is_startup_error(&self) -> bool {
        matches!(self, EmosiError::Config(_) | EmosiError::Artifact(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = EmosiError::config("Test config error");
        assert_eq!(error.to_string(), "Configuration error: Test config error");

        let error = EmosiError::artifact("Test artifact error");
        assert_eq!(error.to_string(), "Artifact error: Test artifact error");

        let error = EmosiError::prediction("Test prediction error");
        assert_eq!(error.to_string(), "Prediction error: Test prediction error");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let emosi_error = EmosiError::from(io_error);

        match emosi_error {
            EmosiError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_startup_errors() {
        assert!(EmosiError::config("x").is_startup_error());
        assert!(EmosiError::artifact("x").is_startup_error());
        assert!(!EmosiError::prediction("x").is_startup_error());
    }
}
