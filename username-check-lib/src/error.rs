//! Error handling for username checking operations.
//!
//! This module defines a comprehensive error type that covers all the different
//! ways a run can fail, from unreadable input files to network issues.
//!
//! Note that the classification path itself never produces these errors:
//! every lookup resolves to a [`crate::Category`], with ambiguity collapsing
//! to `Category::Error`. The error type here covers pre-run setup (input
//! file, configuration, sink creation) and per-write sink faults.

use std::fmt;

/// Main error type for username checking operations.
#[derive(Debug, Clone)]
pub enum UsernameCheckError {
    /// Network-related errors (connection, DNS, TLS, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// JSON parsing errors for lookup responses
    ParseError { message: String },

    /// Configuration errors (invalid settings, unreadable config files)
    ConfigError { message: String },

    /// File I/O errors when reading username lists or writing results
    FileError { path: String, message: String },

    /// Timeout errors when operations take too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl UsernameCheckError {
    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new parse error.
    pub fn parse<M: Into<String>>(message: M) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl fmt::Display for UsernameCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for UsernameCheckError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for UsernameCheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(10))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for UsernameCheckError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}

impl From<std::io::Error> for UsernameCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_display() {
        let err = UsernameCheckError::file_error("usernames.txt", "No such file or directory");
        let msg = err.to_string();
        assert!(msg.contains("usernames.txt"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn test_timeout_display_names_operation() {
        let err =
            UsernameCheckError::timeout("profile lookup", std::time::Duration::from_secs(10));
        assert!(err.to_string().contains("profile lookup"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: UsernameCheckError = io.into();
        assert!(matches!(err, UsernameCheckError::Internal { .. }));
    }
}
