//! AuthApi tests against a mock account API

use shop_api::password::hash_password;
use shop_api::{AuthApi, Error};

#[tokio::test]
async fn test_fetch_session() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/auth/session")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"csrfToken":"csrf-1","isAuthenticated":false,"noCaptchaKey":"site-key"}"#)
        .create_async()
        .await;

    let api = AuthApi::with_base_url(server.url());
    let session = api.fetch_session().await.expect("session");

    assert_eq!(session.csrf_token, "csrf-1");
    assert!(!session.is_authenticated);
    assert_eq!(session.no_captcha_key, "site-key");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_success_sends_hashed_password_and_csrf() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/auth/login")
        .match_header("x-csrf-token", "csrf-1")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "email": "satoshi@example.com",
            "hashedPassword": hash_password("hunter2"),
            "gCaptchaResponse": "captcha",
            "authSource": ""
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accessTypes":["personal"]}"#)
        .create_async()
        .await;

    let api = AuthApi::with_base_url(server.url());
    let response = api
        .login("satoshi@example.com", "hunter2", "csrf-1", Some("captcha"))
        .await
        .expect("login");

    assert_eq!(response.access_types, vec!["personal".to_string()]);
    assert!(!response.two_factor_pending);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_two_factor_pending_is_not_an_error() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/auth/login")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Two factor required","twoFactorPending":true}"#)
        .create_async()
        .await;

    let api = AuthApi::with_base_url(server.url());
    let response = api
        .login("satoshi@example.com", "hunter2", "csrf-1", None)
        .await
        .expect("pending second factor is a successful outcome");

    assert!(response.two_factor_pending);
    assert!(!response.email_authentication_pending);
    assert!(response.access_types.is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_email_authentication_pending_is_not_an_error() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/auth/login")
        .with_status(403)
        .with_body(r#"{"emailAuthenticationPending":true}"#)
        .create_async()
        .await;

    let api = AuthApi::with_base_url(server.url());
    let response = api
        .login("satoshi@example.com", "hunter2", "csrf-1", None)
        .await
        .expect("pending email confirmation is a successful outcome");

    assert!(response.email_authentication_pending);
    assert!(!response.two_factor_pending);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_other_failures_propagate() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/auth/login")
        .with_status(401)
        .with_body(r#"{"error":"Invalid credentials"}"#)
        .create_async()
        .await;

    let api = AuthApi::with_base_url(server.url());
    let result = api
        .login("satoshi@example.com", "wrong", "csrf-1", None)
        .await;

    match result {
        Err(Error::Http(err)) => assert_eq!(err.status(), Some(401)),
        other => panic!("Expected Error::Http, got {:?}", other),
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_login_empty_password_skips_request() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/auth/login")
        .expect(0)
        .create_async()
        .await;

    let api = AuthApi::with_base_url(server.url());
    let response = api
        .login("satoshi@example.com", "", "csrf-1", None)
        .await
        .expect("empty password resolves");

    assert!(response.access_types.is_empty());
    assert!(!response.two_factor_pending);
    assert!(!response.email_authentication_pending);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_two_factor() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/dashboard-api/verify-two-factor-code")
        .match_header("x-csrf-token", "csrf-2")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "twoFactorCode": "123456"
        })))
        .with_status(200)
        .with_body(r#"{"accessTypes":["personal","merchant"]}"#)
        .create_async()
        .await;

    let api = AuthApi::with_base_url(server.url());
    let response = api
        .submit_two_factor("123456", "csrf-2")
        .await
        .expect("two factor accepted");

    assert_eq!(response.access_types.len(), 2);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_pairing_code() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/auth/generateBitAuthPairingCode")
        .match_header("x-csrf-token", "csrf-3")
        .with_status(200)
        .with_body(r#"{"data":{"url":"https://host/x?a=1&secret=abc123&b=2"}}"#)
        .create_async()
        .await;

    let api = AuthApi::with_base_url(server.url());
    let secret = api
        .generate_pairing_code("csrf-3")
        .await
        .expect("pairing code");

    assert_eq!(secret, "abc123");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_pairing_code_malformed_url() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/auth/generateBitAuthPairingCode")
        .with_status(200)
        .with_body(r#"{"data":{"url":"https://host/pair"}}"#)
        .create_async()
        .await;

    let api = AuthApi::with_base_url(server.url());
    let result = api.generate_pairing_code("csrf-3").await;

    assert!(matches!(result, Err(Error::InvalidPairingUrl(_))));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_pair_returns_token() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/v2/")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "method": "createToken",
            "params": {
                "secret": "abc123",
                "version": 2,
                "deviceName": "Pixel 8",
                "code": "654321"
            }
        })))
        .with_status(200)
        .with_body(r#"{"data":"api-token"}"#)
        .create_async()
        .await;

    let api = AuthApi::with_base_url(server.url()).with_device_name("Pixel 8");
    let token = api.pair("abc123", Some("654321")).await.expect("token");

    assert_eq!(token, "api-token");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_pair_error_payload() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/v2/")
        .with_status(200)
        .with_body(r#"{"error":"Invalid secret"}"#)
        .create_async()
        .await;

    let api = AuthApi::with_base_url(server.url());
    let result = api.pair("bad", None).await;

    match result {
        Err(Error::Api(message)) => assert_eq!(message, "Invalid secret"),
        other => panic!("Expected Error::Api, got {:?}", other),
    }

    mock.assert_async().await;
}
