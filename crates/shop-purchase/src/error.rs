//! Purchase flow errors

use shop_common::ServiceError;
use thiserror::Error;

/// Result type for purchase flow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shown when a submission fails without a usable message
pub const SEND_FAILED_MESSAGE: &str = "Could not send transaction";

/// Shown when a proposal cannot be created for an unrecognised reason
pub const PROPOSAL_FAILED_MESSAGE: &str = "Could not create the transaction proposal";

/// Purchase flow error
#[derive(Debug, Error)]
pub enum Error {
    /// The user has no wallet able to pay
    #[error("No wallets available")]
    NoWallets,
    /// The flow already completed or was cancelled
    #[error("Purchase flow has finished")]
    Finished,
    /// The operation needs a confirmed proposal
    #[error("No transaction proposal is ready")]
    NotReady,
    /// The wallet's owning key is unknown
    #[error("Key `{0}` not found")]
    KeyNotFound(String),
    /// Another flow is already submitting this invoice
    #[error("Purchase for invoice `{0}` is already in progress")]
    PurchaseInProgress(String),
    /// Invoice or proposal creation failed
    #[error("Could not create transaction proposal: {0}")]
    ProposalCreation(#[source] ServiceError),
    /// Payment submission or redemption failed; the purchase was rolled back
    #[error("Payment failed: {message}")]
    PaymentFailed {
        /// Message shown to the user
        message: String,
        /// Underlying failure
        #[source]
        source: ServiceError,
    },
}

/// Message shown to the user for a failed service call
///
/// Precedence: message from the API error body, then the error's own
/// message, then `fallback`.
pub fn resolve_error_message(err: &ServiceError, fallback: &str) -> String {
    if let Some(message) = err.api_message() {
        return message.to_string();
    }

    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Fallback message for a failed proposal creation
pub fn proposal_error_fallback(err: &ServiceError) -> &'static str {
    match err {
        ServiceError::InsufficientFunds => "Insufficient funds to complete this purchase",
        _ => PROPOSAL_FAILED_MESSAGE,
    }
}
