//! Error types for the assistant.

use thiserror::Error;

/// Errors that can occur while talking to the model endpoint.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The configuration is unusable
    #[error("Invalid assistant configuration: {0}")]
    Config(String),

    /// The request could not be sent or timed out
    #[error("Request to model endpoint failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Model endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The response body was not the expected JSON
    #[error("Failed to decode model response: {0}")]
    Decode(String),
}

/// Result type alias for assistant operations.
pub type Result<T> = std::result::Result<T, AssistantError>;
