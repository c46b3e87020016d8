//! Errors returned by shop collaborators

use serde::Deserialize;
use shop_http_client::HttpError;
use thiserror::Error;

/// Failure reported by an external shop or wallet service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The remote API answered with an error body
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// `message` field of the error body
        message: String,
    },
    /// Wallet cannot cover the amount and fees
    #[error("Insufficient funds")]
    InsufficientFunds,
    /// No purchase is known for the invoice
    #[error("Unknown invoice: `{0}`")]
    UnknownInvoice(String),
    /// Transport failure
    #[error(transparent)]
    Http(#[from] HttpError),
    /// Any other failure
    #[error("{0}")]
    Custom(String),
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl ServiceError {
    /// Message carried in the API error body, if any
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ServiceError::Api { message, .. } if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// Lift an [`HttpError`] into [`ServiceError::Api`] when its body is `{"message": ...}`
    pub fn from_http(err: HttpError) -> Self {
        let api = match (&err, err.body()) {
            (HttpError::Status { status, .. }, Some(body)) => {
                serde_json::from_str::<ApiErrorBody>(body)
                    .ok()
                    .and_then(|b| b.message)
                    .map(|message| ServiceError::Api {
                        status: *status,
                        message,
                    })
            }
            _ => None,
        };

        api.unwrap_or(ServiceError::Http(err))
    }
}
