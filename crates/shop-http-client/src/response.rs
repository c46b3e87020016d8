//! HTTP response types

use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// Result of every HTTP operation
pub type Response<R, E = HttpError> = Result<R, E>;

/// Raw HTTP response with status code and body access
#[derive(Debug)]
pub struct RawResponse {
    status: u16,
    inner: reqwest::Response,
}

impl RawResponse {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self {
            status: response.status().as_u16(),
            inner: response,
        }
    }

    /// Get the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if the response status is a success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text
    pub async fn text(self) -> Response<String> {
        self.inner.text().await.map_err(HttpError::from)
    }

    /// Get the response body as JSON
    pub async fn json<T: DeserializeOwned>(self) -> Response<T> {
        self.inner.json().await.map_err(HttpError::from)
    }

    /// Deserialize a 2xx body, or turn any other status into [`HttpError::Status`]
    pub async fn into_json<T: DeserializeOwned>(self) -> Response<T> {
        let status = self.status;
        let body = self.text().await?;

        if !(200..300).contains(&status) {
            tracing::debug!("Error response ({}): {}", status, body);
            return Err(HttpError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("JSON parse error: {} - Body: {}", e, body);
            HttpError::from(e)
        })
    }
}
