//! Error types for carousel operations.

use thiserror::Error;

/// Result type for carousel operations.
pub type CarouselResult<T> = Result<T, CarouselError>;

/// Errors that can occur in carousel operations.
///
/// Every error aborts only the command that raised it; the registry and the
/// rest of the engine state are left as they were.
#[derive(Debug, Error)]
pub enum CarouselError {
    /// A configuration value or combination is not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Item (by handle or slot) is not present in the registry.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Configuration or command serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
