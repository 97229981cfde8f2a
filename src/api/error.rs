//! Errors returned by the `/foods` REST client.

use thiserror::Error;

/// Failure of a single call against the `/foods` resource.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The server rejected the payload (400 or 422).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No food plate lives at the addressed URL.
    #[error("Food plate not found: {0}")]
    NotFound(String),

    /// Any other non-2xx response.
    #[error("Server returned status {status}: {message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body is not the expected JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classifies a non-2xx response.
    pub fn from_status(status: u16, url: &str, body: String) -> Self {
        match status {
            404 => ApiError::NotFound(url.to_string()),
            400 | 422 => ApiError::Validation(body),
            _ => ApiError::Server {
                status,
                message: body,
            },
        }
    }
}
