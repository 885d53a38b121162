//! Signup webhook handler.
//!
//! Adapts an axum request to a `SignupRequest` and converts the resulting
//! descriptor back into an HTTP response.

use crate::models::ResponseDescriptor;
use crate::routes::AppState;
use crate::services::signup::{handle_signup, SignupBody, SignupRequest};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
};
use std::sync::Arc;
use tracing::instrument;

/// Handler for any method on `/`.
///
/// The body is read raw. An empty body is treated as `{}`; a body that is
/// not JSON becomes `400 "Invalid JSON"` in the orchestrator.
#[instrument(skip_all, name = "signup.webhook")]
pub async fn signup_webhook(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> ResponseDescriptor {
    let request = SignupRequest {
        method: method.as_str(),
        headers: Some(&headers),
        body: parse_body(&body),
    };

    handle_signup(&request, &state.config, &state.http_client).await
}

fn parse_body(body: &[u8]) -> SignupBody {
    if body.iter().all(u8::is_ascii_whitespace) {
        return SignupBody::Absent;
    }

    match serde_json::from_slice(body) {
        Ok(value) => SignupBody::Parsed(value),
        Err(e) => {
            tracing::debug!(target: "signup.handlers", error = %e, "Request body is not valid JSON");
            SignupBody::Malformed
        }
    }
}
