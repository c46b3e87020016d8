//! Clients for the wallet's account and gift card shop APIs
//!
//! [`AuthApi`] covers the session, login, two-factor and pairing endpoints.
//! [`GiftCardApi`] creates gift card invoices and redeems paid cards, and
//! plugs into the purchase flow as its invoice and redemption service.

pub mod auth;
pub mod error;
pub mod giftcards;
pub mod password;
pub mod types;

pub use auth::AuthApi;
pub use error::{Error, Result};
pub use giftcards::{GiftCardApi, PurchaseRecord};
pub use types::{LoginResponse, Session};
