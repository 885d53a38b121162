//! Fixed configuration fixtures.
//!
//! Values are constant so known-answer tests stay reproducible.

use std::collections::HashMap;

/// Admin key identifier (the token `kid`).
pub const TEST_ADMIN_KEY_ID: &str = "6489d5cc1e2f0a0001a1b2c3";

/// Admin key secret as hex (32 bytes).
pub const TEST_ADMIN_KEY_SECRET_HEX: &str =
    "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

/// Full admin key material, `<id>:<hex-secret>`.
pub const TEST_ADMIN_KEY: &str =
    "6489d5cc1e2f0a0001a1b2c3:00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

/// Shared bearer secret expected from webhook callers.
pub const TEST_SHARED_SECRET: &str = "s3cret";

/// `Authorization` header value for `secret`.
pub fn bearer(secret: &str) -> String {
    format!("Bearer {secret}")
}

/// Environment for a fully configured service pointing at `ghost_url`.
pub fn configured_vars(ghost_url: &str) -> HashMap<String, String> {
    HashMap::from([
        ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
        ("SHARED_SECRET".to_string(), TEST_SHARED_SECRET.to_string()),
        ("GHOST_ADMIN_KEY".to_string(), TEST_ADMIN_KEY.to_string()),
        ("GHOST_URL".to_string(), ghost_url.to_string()),
    ])
}

/// Environment with none of the upstream settings.
pub fn unconfigured_vars() -> HashMap<String, String> {
    HashMap::from([("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string())])
}
