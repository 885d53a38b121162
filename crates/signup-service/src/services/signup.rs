//! Signup orchestration.
//!
//! Runs one inbound request through a fixed sequence of checks and produces
//! exactly one `ResponseDescriptor`:
//!
//! ```text
//! MethodCheck -> ConfigCheck -> AuthCheck -> BodyValidate -> IssueToken -> UpstreamWrite
//! ```
//!
//! The first failing step is terminal. Nothing is retried.

use crate::auth::{authenticate, HeaderLookup};
use crate::config::Config;
use crate::crypto::{issue_admin_token, AdminKey};
use crate::errors::SignupError;
use crate::models::{NewMember, ResponseDescriptor, SignupAck};
use crate::observability::metrics::record_signup;
use crate::services::ghost_client::{GhostClient, MemberOutcome, UpstreamError};
use common::secret::ExposeSecret;
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Inbound request body as the host adapter saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum SignupBody {
    /// Body parsed as JSON (any JSON value).
    Parsed(Value),
    /// Body present but not valid JSON.
    Malformed,
    /// No body; treated as an empty object.
    Absent,
}

/// Everything the orchestrator reads from the inbound request.
pub struct SignupRequest<'a> {
    pub method: &'a str,
    pub headers: Option<&'a dyn HeaderLookup>,
    pub body: SignupBody,
}

/// Validated signup fields.
#[derive(Debug, PartialEq, Eq)]
struct SignupFields {
    email: String,
    name: Option<String>,
}

/// Handle one signup request.
///
/// Never fails: every error becomes a descriptor with the matching status.
#[instrument(skip_all, fields(method = %request.method))]
pub async fn handle_signup(
    request: &SignupRequest<'_>,
    config: &Config,
    http_client: &reqwest::Client,
) -> ResponseDescriptor {
    let result = run_signup(request, config, http_client).await;

    match result {
        Ok(outcome) => {
            record_signup("success");
            match outcome {
                MemberOutcome::Created(status) => {
                    info!(target: "signup.services.signup", status, "Signup completed");
                }
                MemberOutcome::AlreadyExists(status) => {
                    info!(target: "signup.services.signup", status, "Signup completed, member already exists");
                }
            }
            success_descriptor()
        }
        Err(err) => {
            record_signup(err.outcome());
            debug!(target: "signup.services.signup", outcome = err.outcome(), "Signup rejected");
            err.into()
        }
    }
}

async fn run_signup(
    request: &SignupRequest<'_>,
    config: &Config,
    http_client: &reqwest::Client,
) -> Result<MemberOutcome, SignupError> {
    if request.method != "POST" {
        return Err(SignupError::MethodNotAllowed);
    }

    let (Some(shared_secret), Some(admin_key), Some(upstream_url)) = (
        config.shared_secret.as_ref(),
        config.admin_key.as_ref(),
        config.upstream_url.as_deref(),
    ) else {
        return Err(SignupError::ServerMisconfigured);
    };

    if !authenticate(request.headers, Some(shared_secret)) {
        return Err(SignupError::Unauthenticated);
    }

    let fields = validate_body(&request.body)?;
    debug!(
        target: "signup.services.signup",
        has_name = fields.name.is_some(),
        "Signup body validated"
    );

    let key = AdminKey::parse(admin_key.expose_secret())?;
    let token = issue_admin_token(&key)?;

    let client = GhostClient::new(
        http_client.clone(),
        upstream_url,
        config.upstream_timeout,
        config.accepted_statuses.clone(),
    );

    client
        .create_member(NewMember::labelled(fields.email, fields.name), &token)
        .await
        .map_err(|e| match e {
            UpstreamError::Rejected { status, body } => {
                SignupError::UpstreamRejected { status, body }
            }
            UpstreamError::Timeout => SignupError::UpstreamTimeout,
            UpstreamError::Transport(detail) => SignupError::UpstreamUnreachable(detail),
        })
}

fn validate_body(body: &SignupBody) -> Result<SignupFields, SignupError> {
    // Arrays pass the shape check but carry no named fields.
    let object = match body {
        SignupBody::Parsed(Value::Object(map)) => Some(map),
        SignupBody::Parsed(Value::Array(_)) | SignupBody::Absent => None,
        SignupBody::Parsed(_) | SignupBody::Malformed => return Err(SignupError::InvalidBody),
    };

    let string_field = |name: &str| {
        object
            .and_then(|map| map.get(name))
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let email = string_field("email").ok_or(SignupError::MissingField("email"))?;
    let name = string_field("name");

    Ok(SignupFields { email, name })
}

fn success_descriptor() -> ResponseDescriptor {
    ResponseDescriptor::json(200, &SignupAck { ok: true }).unwrap_or_else(|e| {
        tracing::error!(target: "signup.services.signup", error = %e, "Failed to serialize acknowledgement");
        ResponseDescriptor::text(500, format!("Internal error: {e}"))
    })
}
