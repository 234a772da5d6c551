//! Error types for cueplay.

use thiserror::Error;

/// Result type alias using cueplay's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cueplay.
#[derive(Error, Debug)]
pub enum Error {
    // Caller errors
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: String,
    },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Cannot access a disposed {0}")]
    Disposed(&'static str),

    // Native engine errors
    #[error("Audio backend error: {0}")]
    Backend(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an invalid-argument error for the named parameter.
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns true if the caller violated a precondition.
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::InvalidOperation(_) | Self::Disposed(_)
        )
    }

    /// Name of the offending parameter, for invalid-argument errors.
    pub const fn argument_name(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { name, .. } => Some(*name),
            _ => None,
        }
    }
}
