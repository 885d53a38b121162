//! Signup webhook integration tests.
//!
//! Drives the real router over HTTP with a `wiremock` server standing in for
//! the upstream Admin API.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::json;
use signup_test_utils::*;
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MEMBERS_PATH: &str = "/ghost/api/admin/members/";

#[derive(Debug, Deserialize)]
struct Claims {
    iat: i64,
    exp: i64,
}

async fn ghost_returning(status: u16) -> MockServer {
    let ghost = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MEMBERS_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream says no"))
        .mount(&ghost)
        .await;
    ghost
}

async fn post_signup(
    server: &TestSignupServer,
    authorization: Option<&str>,
    body: serde_json::Value,
) -> Result<reqwest::Response, anyhow::Error> {
    let mut request = reqwest::Client::new().post(server.url()).json(&body);
    if let Some(value) = authorization {
        request = request.header("Authorization", value);
    }
    Ok(request.send().await?)
}

/// Created upstream: 200 with `{"ok":true}` as JSON.
#[tokio::test]
async fn test_signup_created_returns_ok() -> Result<(), anyhow::Error> {
    let ghost = ghost_returning(201).await;
    let server = TestSignupServer::spawn_with_upstream(&ghost.uri()).await?;

    let response = post_signup(
        &server,
        Some(&bearer(TEST_SHARED_SECRET)),
        json!({"email": "a@b.com", "name": "Ada"}),
    )
    .await?;

    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(response.text().await?, r#"{"ok":true}"#);

    Ok(())
}

/// 409 and 422 mean the member already exists: still success.
#[tokio::test]
async fn test_signup_existing_member_returns_ok() -> Result<(), anyhow::Error> {
    for status in [409, 422] {
        let ghost = ghost_returning(status).await;
        let server = TestSignupServer::spawn_with_upstream(&ghost.uri()).await?;

        let response = post_signup(
            &server,
            Some(&bearer(TEST_SHARED_SECRET)),
            json!({"email": "a@b.com"}),
        )
        .await?;

        assert_eq!(response.status(), 200, "upstream status {status}");
        assert_eq!(response.text().await?, r#"{"ok":true}"#);
    }

    Ok(())
}

/// Any other upstream status is surfaced as 500 with status and body text.
#[tokio::test]
async fn test_signup_upstream_failure_returns_500() -> Result<(), anyhow::Error> {
    let ghost = ghost_returning(500).await;
    let server = TestSignupServer::spawn_with_upstream(&ghost.uri()).await?;

    let response = post_signup(
        &server,
        Some(&bearer(TEST_SHARED_SECRET)),
        json!({"email": "a@b.com"}),
    )
    .await?;

    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await?, "Ghost error 500: upstream says no");

    Ok(())
}

/// Wrong or missing bearer: 401 and nothing reaches upstream.
#[tokio::test]
async fn test_signup_requires_bearer() -> Result<(), anyhow::Error> {
    let ghost = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&ghost)
        .await;
    let server = TestSignupServer::spawn_with_upstream(&ghost.uri()).await?;

    for authorization in [None, Some("Bearer wrong"), Some("bearer s3cret")] {
        let response = post_signup(&server, authorization, json!({"email": "a@b.com"})).await?;
        assert_eq!(response.status(), 401, "authorization {authorization:?}");
        assert_eq!(response.text().await?, "Unauthorized");
    }

    Ok(())
}

/// Missing configuration wins over authentication.
#[tokio::test]
async fn test_signup_unconfigured_returns_500() -> Result<(), anyhow::Error> {
    let server = TestSignupServer::spawn_unconfigured().await?;

    let response = post_signup(&server, None, json!({"email": "a@b.com"})).await?;

    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await?, "Server not configured");

    Ok(())
}

#[tokio::test]
async fn test_signup_missing_email_returns_400() -> Result<(), anyhow::Error> {
    let ghost = ghost_returning(201).await;
    let server = TestSignupServer::spawn_with_upstream(&ghost.uri()).await?;

    let response = post_signup(&server, Some(&bearer(TEST_SHARED_SECRET)), json!({})).await?;

    assert_eq!(response.status(), 400);
    assert_eq!(response.text().await?, "Missing email");

    Ok(())
}

#[tokio::test]
async fn test_signup_non_post_returns_405() -> Result<(), anyhow::Error> {
    let ghost = ghost_returning(201).await;
    let server = TestSignupServer::spawn_with_upstream(&ghost.uri()).await?;

    let response = reqwest::Client::new()
        .put(server.url())
        .header("Authorization", bearer(TEST_SHARED_SECRET))
        .send()
        .await?;

    assert_eq!(response.status(), 405);
    assert_eq!(response.text().await?, "Method Not Allowed");

    Ok(())
}

/// The upstream call carries a fresh admin token that verifies with the
/// configured key under an independent HS256 implementation.
#[tokio::test]
async fn test_signup_sends_verifiable_admin_token() -> Result<(), anyhow::Error> {
    let ghost = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MEMBERS_PATH))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&ghost)
        .await;
    let server = TestSignupServer::spawn_with_upstream(&ghost.uri()).await?;

    let response = post_signup(
        &server,
        Some(&bearer(TEST_SHARED_SECRET)),
        json!({"email": "a@b.com"}),
    )
    .await?;
    assert_eq!(response.status(), 200);

    let received = ghost
        .received_requests()
        .await
        .ok_or_else(|| anyhow::anyhow!("request recording disabled"))?;
    let upstream = received
        .first()
        .ok_or_else(|| anyhow::anyhow!("no upstream request"))?;

    let authorization = upstream
        .headers
        .get("authorization")
        .ok_or_else(|| anyhow::anyhow!("missing authorization"))?
        .to_str()?;
    let token = authorization
        .strip_prefix("Ghost ")
        .ok_or_else(|| anyhow::anyhow!("unexpected scheme: {authorization}"))?;

    token
        .assert_valid_admin_token()
        .assert_key_id(TEST_ADMIN_KEY_ID)
        .assert_lifetime(300);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&["/admin/"]);
    validation.set_required_spec_claims(&["exp", "aud"]);
    let secret = hex::decode(TEST_ADMIN_KEY_SECRET_HEX)?;
    let data = decode::<Claims>(token, &DecodingKey::from_secret(&secret), &validation)?;
    assert_eq!(data.claims.exp - data.claims.iat, 300);

    let payload: serde_json::Value = serde_json::from_slice(&upstream.body)?;
    assert_eq!(
        payload,
        json!({"members": [{"email": "a@b.com", "labels": [{"name": "Builder"}]}]})
    );

    Ok(())
}

/// A slow upstream is cut off by the configured timeout.
#[tokio::test]
async fn test_signup_upstream_timeout_returns_500() -> Result<(), anyhow::Error> {
    let ghost = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(3)))
        .mount(&ghost)
        .await;

    let mut vars: HashMap<String, String> = configured_vars(&ghost.uri());
    vars.insert("GHOST_TIMEOUT_SECONDS".to_string(), "1".to_string());
    let server = TestSignupServer::spawn(&vars).await?;

    let response = post_signup(
        &server,
        Some(&bearer(TEST_SHARED_SECRET)),
        json!({"email": "a@b.com"}),
    )
    .await?;

    assert_eq!(response.status(), 500);
    assert_eq!(
        response.text().await?,
        "Internal error: upstream request timed out"
    );

    Ok(())
}
