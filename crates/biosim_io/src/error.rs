//! Error types for biosim_io crate.
//!
//! Parse failures carry the file and line they came from; everything else
//! wraps the underlying filesystem, TOML or simulation error.

use biosim_core::SimError;
use thiserror::Error;

/// Main error type for biosim_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed text input
    #[error("{file}:{line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    /// Errors raised by the simulation model while building from file data
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for biosim_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// Creates a parse error located at `file:line`.
    #[must_use]
    pub fn parse<F: Into<String>, S: Into<String>>(file: F, line: usize, msg: S) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: msg.into(),
        }
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a new not found error.
    #[must_use]
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound(resource.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
