//! Error types for the realestate API client.

use reqwest::StatusCode;
use thiserror::Error;

/// Error type for all realestate fetch operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection failure, timeout or other transport error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Transport failure reported as a message.
    #[error("network error: {0}")]
    Network(String),
    /// Non-success HTTP status, with the response body.
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// Body was not a JSON list of properties.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// Configured base URL could not be parsed.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    /// The fetch task was cancelled before it completed.
    #[error("request cancelled")]
    Cancelled,
}

/// Result type for realestate fetch operations.
pub type Result<T> = std::result::Result<T, Error>;
