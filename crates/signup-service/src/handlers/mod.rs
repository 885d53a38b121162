//! HTTP request handlers for the signup service.

pub mod health;
pub mod metrics;
pub mod signup;

pub use health::health_check;
pub use metrics::metrics_handler;
pub use signup::signup_webhook;

use crate::errors::SignupError;
use crate::models::ResponseDescriptor;

/// Fallback for unknown paths and unsupported methods.
pub async fn method_not_allowed() -> ResponseDescriptor {
    SignupError::MethodNotAllowed.into()
}
