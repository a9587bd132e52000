//! Backend call error types.

use thiserror::Error;

/// Errors that can occur when calling the storefront backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Non-success HTTP status. `message` is the backend's own text when it
    /// sent one.
    #[error("HTTP {status} for {url}")]
    Http {
        status: u16,
        url: String,
        message: Option<String>,
    },

    /// Request exceeded the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Could not reach the backend.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Deserialization(String),

    /// Request could not be built or sent.
    #[error("Request error: {0}")]
    Request(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FetchError {
    /// Text suitable for a customer-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            FetchError::Http { status, .. } if *status >= 500 => {
                "The store is having trouble right now. Please try again.".to_string()
            }
            FetchError::Http { .. } => "The request was rejected.".to_string(),
            FetchError::Timeout(_) | FetchError::Connection(_) => {
                "Could not reach the store. Check your connection and try again.".to_string()
            }
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Whether retrying the same call might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http { status, .. } => *status >= 500 || *status == 429,
            FetchError::Timeout(_) | FetchError::Connection(_) => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_decode() {
            FetchError::Deserialization(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}
