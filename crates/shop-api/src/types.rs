//! Wire types of the account and shop APIs

use serde::{Deserialize, Serialize};
use shop_common::{GiftCardStatus, Invoice};

/// Browser-style session of the account API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Token to send in the `x-csrf-token` header of mutating calls
    pub csrf_token: String,
    /// Whether the session belongs to a logged in user
    #[serde(default)]
    pub is_authenticated: bool,
    /// Site key of the CAPTCHA challenge
    #[serde(default)]
    pub no_captcha_key: String,
    /// CAPTCHA disabled for this session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_disabled: Option<bool>,
    /// Email verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// Outcome of a login or two-factor submission
///
/// Pending second factors are successful outcomes, not errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Access granted to the session
    #[serde(default)]
    pub access_types: Vec<String>,
    /// A two-factor code must be submitted next
    #[serde(default)]
    pub two_factor_pending: bool,
    /// The user must confirm the login by email
    #[serde(default)]
    pub email_authentication_pending: bool,
}

impl LoginResponse {
    /// Two-factor code required
    pub fn two_factor_pending() -> Self {
        Self {
            two_factor_pending: true,
            ..Default::default()
        }
    }

    /// Email confirmation required
    pub fn email_authentication_pending() -> Self {
        Self {
            email_authentication_pending: true,
            ..Default::default()
        }
    }
}

/// Error body of a failed login
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub two_factor_pending: bool,
    #[serde(default)]
    pub email_authentication_pending: bool,
}

/// Login request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub hashed_password: &'a str,
    pub g_captcha_response: Option<&'a str>,
    pub auth_source: &'a str,
}

/// Two-factor request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TwoFactorRequest<'a> {
    pub two_factor_code: &'a str,
}

/// Response of the pairing code endpoint
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeneratePairingCodeResponse {
    pub data: Option<PairingCodeData>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PairingCodeData {
    #[serde(default)]
    pub url: String,
}

/// Token exchange call
#[derive(Debug, Serialize)]
pub(crate) struct CreateTokenRequest<'a> {
    pub method: &'static str,
    pub params: CreateTokenParams<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTokenParams<'a> {
    pub secret: &'a str,
    pub version: u8,
    pub device_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateTokenResponse {
    pub data: Option<String>,
    pub error: Option<String>,
}

/// Response of the gift card invoice endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GiftCardInvoiceResponse {
    pub access_key: String,
    pub invoice_id: String,
    pub invoice: Invoice,
    #[serde(default)]
    pub total_discount: Option<f64>,
}

/// Gift card redemption request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RedeemGiftCardRequest<'a> {
    pub invoice_id: &'a str,
    pub access_key: &'a str,
    pub client_id: &'a str,
}

/// Response of the gift card redemption endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RedeemGiftCardResponse {
    pub status: GiftCardStatus,
    #[serde(default)]
    pub claim_code: Option<String>,
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}
