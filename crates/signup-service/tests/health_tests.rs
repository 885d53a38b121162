//! Health and fallback integration tests.
//!
//! Tests the operational routes using the `TestSignupServer` harness.

use signup_test_utils::TestSignupServer;

/// Health answers 200 "ok" even without upstream settings.
#[tokio::test]
async fn test_health_endpoint_returns_ok_when_unconfigured() -> Result<(), anyhow::Error> {
    let server = TestSignupServer::spawn_unconfigured().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await?, "ok");

    Ok(())
}

/// Unknown routes answer 405 with the plain-text body.
#[tokio::test]
async fn test_unknown_route_returns_405() -> Result<(), anyhow::Error> {
    let server = TestSignupServer::spawn_unconfigured().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/subscribe", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 405);
    assert_eq!(response.text().await?, "Method Not Allowed");

    Ok(())
}

/// Metrics are served in Prometheus text format.
#[tokio::test]
async fn test_metrics_endpoint_returns_200() -> Result<(), anyhow::Error> {
    let server = TestSignupServer::spawn_unconfigured().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/metrics", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 200);

    Ok(())
}
