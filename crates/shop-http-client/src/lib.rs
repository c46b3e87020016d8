//! HTTP client wrapper for the wallet shop APIs
//!
//! Wraps `reqwest` behind a small surface so the API crates never touch the
//! backend directly. Failed statuses are turned into [`HttpError::Status`]
//! carrying the raw response body, which callers may inspect for expected
//! error payloads.
//!
//! # Example
//!
//! ```no_run
//! use shop_http_client::{HttpClient, Response};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Session {
//!     #[serde(rename = "csrfToken")]
//!     csrf_token: String,
//! }
//!
//! async fn example() -> Response<Session> {
//!     let client = HttpClient::new();
//!     client.fetch("https://test.bitpay.com/auth/session").await
//! }
//! ```

mod client;
mod error;
mod request;
mod response;

pub use client::{HttpClient, HttpClientBuilder};
pub use error::HttpError;
pub use request::RequestBuilder;
pub use response::{RawResponse, Response};
