//! Test server harness for E2E testing
//!
//! Provides `TestSignupServer` for spawning real signup server instances in
//! tests.

use crate::fixtures::{configured_vars, unconfigured_vars};
use signup_service::config::Config;
use signup_service::observability::metrics::detached_metrics_handle;
use signup_service::routes::{self, AppState};
use signup_service::services::build_http_client;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Test harness for spawning the signup server in E2E tests.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_health_e2e() -> Result<(), anyhow::Error> {
///     let server = TestSignupServer::spawn_unconfigured().await?;
///
///     let response = reqwest::get(format!("{}/health", server.url())).await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestSignupServer {
    addr: SocketAddr,
    config: Config,
    _handle: JoinHandle<()>,
}

impl TestSignupServer {
    /// Spawn a server configured from `vars`.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Use a detached metrics handle (no global recorder)
    /// - Start the HTTP server in the background
    pub async fn spawn(vars: &HashMap<String, String>) -> Result<Self, anyhow::Error> {
        let config = Config::from_vars(vars)
            .map_err(|e| anyhow::anyhow!("Failed to create config: {}", e))?;

        let http_client = build_http_client()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        let metrics_handle = detached_metrics_handle()
            .map_err(|e| anyhow::anyhow!("Failed to build metrics handle: {}", e))?;

        let state = Arc::new(AppState {
            config: config.clone(),
            http_client,
            metrics_handle,
        });

        // Build routes using signup-service's real route builder
        let app = routes::build_routes(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        // Spawn server in background
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            _handle: handle,
        })
    }

    /// Spawn a fully configured server whose upstream is `ghost_url`.
    pub async fn spawn_with_upstream(ghost_url: &str) -> Result<Self, anyhow::Error> {
        Self::spawn(&configured_vars(ghost_url)).await
    }

    /// Spawn a server with no upstream settings.
    pub async fn spawn_unconfigured() -> Result<Self, anyhow::Error> {
        Self::spawn(&unconfigured_vars()).await
    }

    /// Get the base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for TestSignupServer {
    fn drop(&mut self) {
        // Abort the HTTP server task so the port is released when the test ends.
        self._handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_spawns_successfully() -> Result<(), anyhow::Error> {
        let server = TestSignupServer::spawn_unconfigured().await?;

        assert!(server.url().starts_with("http://127.0.0.1:"));

        let response = reqwest::get(format!("{}/health", server.url())).await?;
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await?, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn test_server_provides_addr() -> Result<(), anyhow::Error> {
        let server = TestSignupServer::spawn_unconfigured().await?;

        let addr = server.addr();
        assert!(addr.ip().is_loopback());
        assert!(addr.port() > 0);
        assert_eq!(server.url(), format!("http://{}", addr));

        Ok(())
    }

    #[tokio::test]
    async fn test_server_provides_config_access() -> Result<(), anyhow::Error> {
        let server = TestSignupServer::spawn_with_upstream("http://ghost.test/").await?;

        let config = server.config();
        assert!(config.is_complete());
        assert_eq!(config.upstream_url.as_deref(), Some("http://ghost.test"));

        Ok(())
    }

    #[tokio::test]
    async fn test_multiple_servers_different_ports() -> Result<(), anyhow::Error> {
        let server1 = TestSignupServer::spawn_unconfigured().await?;
        let server2 = TestSignupServer::spawn_unconfigured().await?;

        assert_ne!(server1.addr(), server2.addr());

        let response1 = reqwest::get(format!("{}/health", server1.url())).await?;
        assert_eq!(response1.status(), 200);

        let response2 = reqwest::get(format!("{}/health", server2.url())).await?;
        assert_eq!(response2.status(), 200);

        Ok(())
    }
}
