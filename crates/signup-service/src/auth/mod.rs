//! Webhook caller authentication.
//!
//! Callers present `Authorization: Bearer <SHARED_SECRET>`. The first
//! authorization value is compared for exact equality with that string.
//! Every failure (no headers, no header, no configured secret, mismatch) is
//! the same `false` so responses never reveal which check failed.

pub mod headers;

pub use headers::{HeaderLookup, HeaderValues};

use common::secret::{ExposeSecret, SecretString};
use tracing::instrument;

/// Header carrying the bearer credential.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Returns true when the first authorization value equals
/// `Bearer <expected_secret>` exactly.
#[instrument(skip_all)]
pub fn authenticate(
    headers: Option<&dyn HeaderLookup>,
    expected_secret: Option<&SecretString>,
) -> bool {
    let Some(secret) = expected_secret.filter(|s| !s.expose_secret().is_empty()) else {
        tracing::debug!(target: "signup.auth", "No shared secret configured");
        return false;
    };

    let presented = headers
        .and_then(|h| h.lookup(AUTHORIZATION_HEADER))
        .and_then(|values| values.first());

    let Some(presented) = presented else {
        tracing::debug!(target: "signup.auth", "Authorization header missing");
        return false;
    };

    let expected = SecretString::from(format!("Bearer {}", secret.expose_secret()));
    let matched = constant_time_eq(presented.as_bytes(), expected.expose_secret().as_bytes());

    if !matched {
        tracing::debug!(target: "signup.auth", "Authorization header mismatch");
    }

    matched
}

/// Byte equality whose running time does not depend on where inputs differ.
/// Length differences still return early.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
