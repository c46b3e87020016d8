//! HTTP request builder

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::HttpError;
use crate::response::{RawResponse, Response};

/// Request builder for calls that need custom headers or bodies
#[derive(Debug)]
pub struct RequestBuilder {
    inner: reqwest::RequestBuilder,
}

impl RequestBuilder {
    pub(crate) fn new(inner: reqwest::RequestBuilder) -> Self {
        Self { inner }
    }

    /// Add a header to the request
    pub fn header(self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        Self {
            inner: self.inner.header(key.as_ref(), value.as_ref()),
        }
    }

    /// Set the request body as JSON
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Self {
        Self {
            inner: self.inner.json(body),
        }
    }

    /// Send the request and return the raw response
    pub async fn send(self) -> Response<RawResponse> {
        let response = self.inner.send().await.map_err(HttpError::from)?;
        Ok(RawResponse::new(response))
    }

    /// Send the request and deserialize a successful JSON response
    pub async fn send_json<R: DeserializeOwned>(self) -> Response<R> {
        self.send().await?.into_json().await
    }
}
