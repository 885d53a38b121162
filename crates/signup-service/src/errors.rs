//! Signup service error types.
//!
//! Every variant is terminal for the request and maps to exactly one
//! `ResponseDescriptor`. Authentication and configuration failures carry no
//! detail. Upstream and internal failures include diagnostic detail in the
//! body for operators and are logged server-side as well.

use crate::crypto::TokenError;
use crate::models::ResponseDescriptor;
use thiserror::Error;

/// Signup error type.
///
/// Maps to HTTP status codes:
/// - MethodNotAllowed: 405
/// - Unauthenticated: 401
/// - InvalidBody, MissingField: 400
/// - everything else: 500
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Server not configured")]
    ServerMisconfigured,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Invalid body")]
    InvalidBody,

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(#[from] TokenError),

    #[error("Upstream rejected request with status {status}")]
    UpstreamRejected { status: u16, body: String },

    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Upstream request timed out")]
    UpstreamTimeout,
}

impl SignupError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            SignupError::MethodNotAllowed => 405,
            SignupError::Unauthenticated => 401,
            SignupError::InvalidBody | SignupError::MissingField(_) => 400,
            SignupError::ServerMisconfigured
            | SignupError::TokenIssuance(_)
            | SignupError::UpstreamRejected { .. }
            | SignupError::UpstreamUnreachable(_)
            | SignupError::UpstreamTimeout => 500,
        }
    }

    /// Bounded label for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            SignupError::MethodNotAllowed => "method_not_allowed",
            SignupError::ServerMisconfigured => "server_misconfigured",
            SignupError::Unauthenticated => "unauthenticated",
            SignupError::InvalidBody => "invalid_body",
            SignupError::MissingField(_) => "missing_field",
            SignupError::TokenIssuance(_) => "token_issuance_failure",
            SignupError::UpstreamRejected { .. } => "upstream_rejected",
            SignupError::UpstreamUnreachable(_) => "upstream_unreachable",
            SignupError::UpstreamTimeout => "upstream_timeout",
        }
    }

    /// Body returned to the caller.
    fn client_body(&self) -> String {
        match self {
            SignupError::MethodNotAllowed => "Method Not Allowed".to_string(),
            SignupError::ServerMisconfigured => "Server not configured".to_string(),
            SignupError::Unauthenticated => "Unauthorized".to_string(),
            SignupError::InvalidBody => "Invalid JSON".to_string(),
            SignupError::MissingField(field) => format!("Missing {field}"),
            SignupError::TokenIssuance(err) => format!("Internal error: {err}"),
            SignupError::UpstreamRejected { status, body } => {
                format!("Ghost error {status}: {body}")
            }
            SignupError::UpstreamUnreachable(detail) => format!("Internal error: {detail}"),
            SignupError::UpstreamTimeout => {
                "Internal error: upstream request timed out".to_string()
            }
        }
    }
}

impl From<SignupError> for ResponseDescriptor {
    fn from(err: SignupError) -> Self {
        match &err {
            SignupError::TokenIssuance(inner) => {
                tracing::error!(target: "signup.errors", error = %inner, "Admin token issuance failed");
            }
            SignupError::UpstreamRejected { status, .. } => {
                tracing::error!(target: "signup.errors", status = status, "Upstream rejected member creation");
            }
            SignupError::UpstreamUnreachable(detail) => {
                tracing::error!(target: "signup.errors", error = %detail, "Upstream unreachable");
            }
            SignupError::UpstreamTimeout => {
                tracing::error!(target: "signup.errors", "Upstream request timed out");
            }
            SignupError::ServerMisconfigured => {
                tracing::error!(target: "signup.errors", "Signup received but server is not configured");
            }
            _ => {}
        }

        ResponseDescriptor::text(err.status_code(), err.client_body())
    }
}
