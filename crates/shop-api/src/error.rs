//! Error types for the shop API clients

use shop_http_client::HttpError;
use thiserror::Error;

/// Result type for shop API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when calling the shop APIs
#[derive(Debug, Error)]
pub enum Error {
    /// API returned an error payload with a success status
    #[error("API error: {0}")]
    Api(String),

    /// HTTP request failed, including non-2xx responses
    #[error("HTTP request failed: {0}")]
    Http(#[from] HttpError),

    /// Pairing URL has no query string
    #[error("Pairing URL has no query string: `{0}`")]
    InvalidPairingUrl(String),

    /// Pairing URL query has no `secret` parameter
    #[error("Pairing URL has no secret")]
    MissingPairingSecret,

    /// Custom error message
    #[error("{0}")]
    Custom(String),
}
