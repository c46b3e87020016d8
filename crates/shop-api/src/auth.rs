//! Account authentication API

use shop_common::Network;
use shop_http_client::{HttpClient, HttpError};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::password::hash_password;
use crate::types::{
    CreateTokenParams, CreateTokenRequest, CreateTokenResponse, GeneratePairingCodeResponse,
    LoginErrorResponse, LoginRequest, LoginResponse, Session, TwoFactorRequest,
};

const SESSION_PATH: &str = "/auth/session";
const LOGIN_PATH: &str = "/auth/login";
const TWO_FACTOR_PATH: &str = "/dashboard-api/verify-two-factor-code";
const PAIRING_CODE_PATH: &str = "/auth/generateBitAuthPairingCode";
const TOKEN_PATH: &str = "/api/v2/";
const CSRF_HEADER: &str = "x-csrf-token";
const DEFAULT_DEVICE_NAME: &str = "unknown device";

/// Client for the account authentication endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    base_url: String,
    device_name: String,
    http_client: HttpClient,
}

impl AuthApi {
    /// Create a client for the API host of `network`
    pub fn new(network: Network) -> Self {
        Self::with_base_url(network.base_url())
    }

    /// Create a client for an explicit API host
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            http_client: HttpClient::new(),
        }
    }

    /// Use a preconfigured HTTP client
    pub fn with_http_client(mut self, http_client: HttpClient) -> Self {
        self.http_client = http_client;
        self
    }

    /// Label the API tokens created by [`AuthApi::pair`] with this device name
    ///
    /// Blank names fall back to `unknown device`.
    pub fn with_device_name(mut self, device_name: impl Into<String>) -> Self {
        let device_name = device_name.into();
        if !device_name.trim().is_empty() {
            self.device_name = device_name;
        }
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the current session, including its CSRF token
    #[instrument(skip(self))]
    pub async fn fetch_session(&self) -> Result<Session> {
        let session: Session = self.http_client.fetch(&self.url(SESSION_PATH)).await?;
        tracing::debug!(
            "Fetched session, authenticated: {}",
            session.is_authenticated
        );
        Ok(session)
    }

    /// Log in with email and password
    ///
    /// The password is hashed before sending. An empty password resolves to
    /// a response without access types and no request is made. A server
    /// rejection asking for a second factor is returned as a successful
    /// [`LoginResponse`] with the matching flag set; any other failure is
    /// returned as is.
    #[instrument(skip(self, password, csrf_token, captcha_response))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        csrf_token: &str,
        captcha_response: Option<&str>,
    ) -> Result<LoginResponse> {
        let hashed_password = hash_password(password);

        if hashed_password.is_empty() {
            tracing::debug!("Empty password, skipping login request");
            return Ok(LoginResponse::default());
        }

        let body = LoginRequest {
            email,
            hashed_password: &hashed_password,
            g_captcha_response: captcha_response,
            auth_source: "",
        };

        let result = self
            .http_client
            .post(&self.url(LOGIN_PATH))
            .header(CSRF_HEADER, csrf_token)
            .json(&body)
            .send_json::<LoginResponse>()
            .await;

        match result {
            Ok(response) => Ok(response),
            Err(err) => match pending_login_response(&err) {
                Some(response) => Ok(response),
                None => Err(err.into()),
            },
        }
    }

    /// Submit the two-factor code of a pending login
    #[instrument(skip(self, code, csrf_token))]
    pub async fn submit_two_factor(&self, code: &str, csrf_token: &str) -> Result<LoginResponse> {
        let body = TwoFactorRequest {
            two_factor_code: code,
        };

        let response = self
            .http_client
            .post(&self.url(TWO_FACTOR_PATH))
            .header(CSRF_HEADER, csrf_token)
            .json(&body)
            .send_json()
            .await?;

        Ok(response)
    }

    /// Request a pairing code for the authenticated user
    ///
    /// The server answers with a redirect URL; the pairing secret is its
    /// `secret` query parameter.
    #[instrument(skip(self, csrf_token))]
    pub async fn generate_pairing_code(&self, csrf_token: &str) -> Result<String> {
        let response: GeneratePairingCodeResponse = self
            .http_client
            .post(&self.url(PAIRING_CODE_PATH))
            .header(CSRF_HEADER, csrf_token)
            .send_json()
            .await
            .inspect_err(|e| tracing::error!("Could not generate pairing code: {}", e))?;

        let pairing_url = response.data.map(|d| d.url).unwrap_or_default();

        extract_pairing_secret(&pairing_url)
    }

    /// Exchange a pairing secret, and optionally a two-factor code, for a
    /// long-lived API token
    #[instrument(skip(self, secret, code))]
    pub async fn pair(&self, secret: &str, code: Option<&str>) -> Result<String> {
        let body = CreateTokenRequest {
            method: "createToken",
            params: CreateTokenParams {
                secret,
                version: 2,
                device_name: &self.device_name,
                code,
            },
        };

        let response: CreateTokenResponse = self
            .http_client
            .post(&self.url(TOKEN_PATH))
            .header("x-accept-version", "2.0.0")
            .json(&body)
            .send_json()
            .await?;

        if let Some(error) = response.error {
            return Err(Error::Api(error));
        }

        let token = response
            .data
            .ok_or_else(|| Error::Custom("Token missing from pairing response".to_string()))?;

        tracing::info!("Paired device `{}`", self.device_name);

        Ok(token)
    }
}

/// Map a rejected login to the pending-factor outcome it announces, if any
fn pending_login_response(err: &HttpError) -> Option<LoginResponse> {
    let body = err.body()?;
    let error: LoginErrorResponse = serde_json::from_str(body).ok()?;

    if error.two_factor_pending {
        tracing::debug!("Login requires a two-factor code");
        Some(LoginResponse::two_factor_pending())
    } else if error.email_authentication_pending {
        tracing::debug!("Login requires email authentication");
        Some(LoginResponse::email_authentication_pending())
    } else {
        tracing::debug!("Login rejected: {:?}", error.error);
        None
    }
}

/// Extract the `secret` query parameter of a pairing URL
///
/// The value is returned as it appears in the URL, without percent or `+`
/// decoding.
pub fn extract_pairing_secret(pairing_url: &str) -> Result<String> {
    let (_, query) = pairing_url
        .split_once('?')
        .ok_or_else(|| Error::InvalidPairingUrl(pairing_url.to_string()))?;

    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "secret")
        .map(|(_, value)| value.to_string())
        .ok_or(Error::MissingPairingSecret)
}
