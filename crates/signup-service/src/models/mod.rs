//! Data models for the signup service.
//!
//! Includes the response descriptor produced by the orchestrator, the member
//! payload sent upstream, and the acknowledgement returned to callers.

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label attached to every member created through the webhook.
pub const MEMBER_LABEL: &str = "Builder";

/// Outcome of one signup request: status, body, optional headers.
///
/// Built exactly once per request and converted to an HTTP response by the
/// host adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDescriptor {
    pub status: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl ResponseDescriptor {
    /// Plain-text descriptor with no extra headers.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: BTreeMap::new(),
        }
    }

    /// JSON descriptor with `Content-Type: application/json`.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(value)?;
        Ok(Self {
            status,
            body,
            headers: BTreeMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl IntoResponse for ResponseDescriptor {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => {
                    tracing::warn!(target: "signup.handlers", header = %name, "Dropping invalid response header");
                }
            }
        }

        response
    }
}

/// Acknowledgement body for a successful signup: `{"ok":true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupAck {
    pub ok: bool,
}

/// Member label as the upstream API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberLabel {
    pub name: String,
}

/// One member to create upstream.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub labels: Vec<MemberLabel>,
}

impl NewMember {
    /// Member with the standard webhook label.
    pub fn labelled(email: String, name: Option<String>) -> Self {
        Self {
            email,
            name,
            labels: vec![MemberLabel {
                name: MEMBER_LABEL.to_string(),
            }],
        }
    }
}

/// Email and name are personal data; keep them out of logs.
impl std::fmt::Debug for NewMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewMember")
            .field("email", &"[REDACTED]")
            .field("name", &self.name.as_ref().map(|_| "[REDACTED]"))
            .field("labels", &self.labels)
            .finish()
    }
}

/// Member-creation request body: `{"members":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCreateRequest {
    pub members: Vec<NewMember>,
}
