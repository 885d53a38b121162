//! Admin API client for member creation.
//!
//! Sends the single member-creation write of a signup. The caller supplies a
//! freshly minted admin token for each call.
//!
//! # Security
//!
//! - The admin token is sent as `Authorization: Ghost <token>` and never logged
//! - Member emails are not logged
//! - Every call has an explicit timeout

use crate::models::{MemberCreateRequest, NewMember};
use crate::observability::metrics::record_upstream_request;
use common::secret::{ExposeSecret, SecretString};
use reqwest::Client;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Member-creation endpoint, relative to the upstream base URL.
pub const MEMBERS_PATH: &str = "/ghost/api/admin/members/";

/// Authorization scheme for admin tokens.
pub const AUTH_SCHEME: &str = "Ghost";

/// Default connect timeout for the shared HTTP client.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("Upstream returned status {status}")]
    Rejected { status: u16, body: String },

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream request failed: {0}")]
    Transport(String),
}

/// Successful member-creation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberOutcome {
    /// 2xx: the member was created.
    Created(u16),
    /// One of the accepted statuses: the member already exists.
    AlreadyExists(u16),
}

/// Build the process-wide HTTP client.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .build()
}

/// Client for one upstream base URL.
///
/// Cheap to construct: wraps a clone of the shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct GhostClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    accepted_statuses: Vec<u16>,
}

impl GhostClient {
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `base_url` - Upstream base URL; trailing slashes are removed
    /// * `timeout` - Per-call timeout
    /// * `accepted_statuses` - Non-2xx statuses treated as success
    pub fn new(
        client: Client,
        base_url: &str,
        timeout: Duration,
        accepted_statuses: Vec<u16>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            accepted_statuses,
        }
    }

    pub fn members_url(&self) -> String {
        format!("{}{}", self.base_url, MEMBERS_PATH)
    }

    /// Create one member.
    ///
    /// # Errors
    ///
    /// - `UpstreamError::Rejected` for any status that is neither 2xx nor accepted
    /// - `UpstreamError::Timeout` when the call exceeds the timeout
    /// - `UpstreamError::Transport` for connection, DNS or TLS failures
    #[instrument(skip_all, fields(labels = member.labels.len()))]
    pub async fn create_member(
        &self,
        member: NewMember,
        token: &SecretString,
    ) -> Result<MemberOutcome, UpstreamError> {
        let url = self.members_url();
        let payload = MemberCreateRequest {
            members: vec![member],
        };

        debug!(target: "signup.services.ghost_client", url = %url, "Creating member");

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("{AUTH_SCHEME} {}", token.expose_secret()),
            )
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    record_upstream_request("timeout", started.elapsed());
                    warn!(target: "signup.services.ghost_client", timeout_seconds = self.timeout.as_secs_f64(), "Upstream request timed out");
                    UpstreamError::Timeout
                } else {
                    record_upstream_request("error", started.elapsed());
                    warn!(target: "signup.services.ghost_client", error = %e, "Upstream request failed");
                    UpstreamError::Transport(e.to_string())
                }
            })?;

        self.handle_response(response, started).await
    }

    /// Map the upstream status to an outcome.
    async fn handle_response(
        &self,
        response: reqwest::Response,
        started: Instant,
    ) -> Result<MemberOutcome, UpstreamError> {
        let status = response.status();
        let code = status.as_u16();

        if status.is_success() {
            record_upstream_request("2xx", started.elapsed());
            debug!(target: "signup.services.ghost_client", status = code, "Member created");
            Ok(MemberOutcome::Created(code))
        } else if self.accepted_statuses.contains(&code) {
            record_upstream_request("accepted", started.elapsed());
            debug!(target: "signup.services.ghost_client", status = code, "Member already exists");
            Ok(MemberOutcome::AlreadyExists(code))
        } else {
            record_upstream_request("rejected", started.elapsed());
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(target: "signup.services.ghost_client", error = %e, "Failed to read error response body");
                String::new()
            });
            warn!(target: "signup.services.ghost_client", status = code, "Upstream rejected member creation");
            Err(UpstreamError::Rejected { status: code, body })
        }
    }
}
