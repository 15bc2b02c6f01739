//! Error types for the setlog_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for setlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Operation invoked in a state that forbids it (caller error; surfaced
    /// immediately, never retried)
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The record store could not be reached. Recoverable: the affected
    /// projection keeps its last-good contents and the caller may retry.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A record id the store does not hold
    #[error("Not found: {0}")]
    NotFound(String),
}
