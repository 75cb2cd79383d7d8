//! Error types for forca
//!
//! Configuration problems are fatal before the pipeline starts. Wordlist
//! read failures and cancellation abort task generation but let in-flight
//! executions drain. Spawn failures travel inside the affected task's
//! result and never stop the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for forca operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for forca
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "workers")
        key: Option<String>,
    },

    /// A wordlist file could not be opened or read
    #[error("wordlist '{path}': {source}")]
    Wordlist {
        /// Path of the wordlist that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Task generation was cut short by the cancellation signal
    #[error("command generation cancelled")]
    Cancelled,

    /// The shell process for one task could not be started
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        /// The fully rendered command that failed to start
        command: String,
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// I/O error outside of wordlist reading (pipe setup, output streams)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A background task panicked or was aborted
    #[error("task join error: {0}")]
    Join(String),
}

impl Error {
    /// Shorthand for a [`Error::Config`] with a known key
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display_includes_message() {
        let err = Error::config("workers must be at least 1", "workers");
        assert_eq!(
            err.to_string(),
            "configuration error: workers must be at least 1"
        );
    }

    #[test]
    fn test_wordlist_error_display_includes_path() {
        let err = Error::Wordlist {
            path: PathBuf::from("users.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("users.txt"), "got: {}", msg);
        assert!(msg.contains("no such file"), "got: {}", msg);
    }

    #[test]
    fn test_cancelled_error_display() {
        assert_eq!(Error::Cancelled.to_string(), "command generation cancelled");
    }
}
