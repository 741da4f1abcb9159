use thiserror::Error;

/// Errors that can occur while reading or writing history.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded or decoded
    #[error("Failed to (de)serialize record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No uploaded file has this id
    #[error("No stored file with id '{0}'")]
    NotFound(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
