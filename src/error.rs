//! Common error types for the indicator engine

use thiserror::Error;

/// Common result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the indicator, ranking and cache services.
///
/// Callers need to distinguish "no data" (`NotFound`) from an empty but
/// valid result: an indicator with zero eligible entities returns an empty
/// map, never an error. All variants propagate unmodified; the engine does
/// not retry and does not substitute defaults.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input or request parameter (malformed rank token,
    /// unknown status name, empty identifier)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested resource not found (no ranking year satisfies the
    /// fallback bound, unknown source identifier, missing entity)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network retrieval failure, or a retrieved page with zero usable
    /// structural blocks; `reason` reports the underlying cause
    #[error("Transport failure for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// Malformed tabular or structured source data (missing CSV header
    /// column, unreadable record)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error (wraps serde_json::Error)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a transport error from a failed request.
    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        Error::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
