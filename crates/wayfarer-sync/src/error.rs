//! Error types for the sync core.

use thiserror::Error;

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync operations.
///
/// Catalog failures (`Network`, `Status`, `Parse`) are absorbed by the catalog
/// cache manager; callers of the other stores see `Storage` and
/// `PermissionDenied` so they can react differently.
#[derive(Debug, Error)]
pub enum Error {
    /// Remote request could not be completed
    #[error("Network error: {0}")]
    Network(String),

    /// Remote answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// Remote payload was not a valid catalog
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Persistent store failed
    #[error("Storage error: {0}")]
    Storage(#[from] wayfarer_store::Error),

    /// Location access refused by the host
    #[error("Permission to access location was denied")]
    PermissionDenied,

    /// Location feed failed to start or stop
    #[error("Location feed error: {0}")]
    Feed(String),

    /// Hotspot id not present in the catalog
    #[error("Unknown hotspot: {0}")]
    UnknownHotspot(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network(e.to_string())
    }
}
