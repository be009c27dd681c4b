//! Error types for biosim_core.
//!
//! Stochastic outcomes (a failed wander, breed or capture) are ordinary
//! branches of the model and never surface here.

use thiserror::Error;

/// Main error type for core simulation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Malformed or inconsistent terrain, species or grid definitions
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown species name or coordinate
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// An operation reached a dead or unregistered animal
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a new lookup error.
    #[must_use]
    pub fn lookup<S: Into<String>>(msg: S) -> Self {
        Self::Lookup(msg.into())
    }

    /// Creates a new invariant violation.
    #[must_use]
    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// True for errors a loader may skip over record by record.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }
}
