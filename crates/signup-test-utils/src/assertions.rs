//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for admin tokens captured from upstream
//! requests.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AdminHeader {
    alg: String,
    typ: String,
    kid: String,
}

#[derive(Debug, Deserialize)]
struct AdminClaims {
    iat: i64,
    exp: i64,
    aud: String,
}

fn decode_part<T: for<'de> Deserialize<'de>>(token: &str, index: usize, what: &str) -> T {
    let part = token
        .split('.')
        .nth(index)
        .unwrap_or_else(|| panic!("Token has no {what} segment"));
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .unwrap_or_else(|e| panic!("Failed to base64url decode token {what}: {e}"));
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("Failed to parse token {what} JSON: {e}"))
}

/// Custom assertions for admin tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_admin_token()
///     .assert_key_id(TEST_ADMIN_KEY_ID)
///     .assert_lifetime(300);
/// ```
pub trait AdminTokenAssertions {
    /// Assert three unpadded base64url segments with an HS256 JWT header and
    /// the admin audience.
    fn assert_valid_admin_token(&self) -> &Self;

    /// Assert the header `kid`.
    fn assert_key_id(&self, key_id: &str) -> &Self;

    /// Assert `exp - iat`.
    fn assert_lifetime(&self, seconds: i64) -> &Self;
}

impl AdminTokenAssertions for str {
    fn assert_valid_admin_token(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "Token must have 3 parts (header.claims.signature), got {}",
            parts.len()
        );
        assert!(
            !self.contains(&['+', '/', '='][..]),
            "Token must use unpadded URL-safe base64: {self}"
        );

        let header: AdminHeader = decode_part(self, 0, "header");
        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        let claims: AdminClaims = decode_part(self, 1, "claims");
        assert_eq!(claims.aud, "/admin/", "Expected admin audience");

        self
    }

    fn assert_key_id(&self, key_id: &str) -> &Self {
        let header: AdminHeader = decode_part(self, 0, "header");
        assert_eq!(header.kid, key_id, "Token signed with unexpected key id");
        self
    }

    fn assert_lifetime(&self, seconds: i64) -> &Self {
        let claims: AdminClaims = decode_part(self, 1, "claims");
        assert_eq!(
            claims.exp - claims.iat,
            seconds,
            "Token lifetime mismatch (iat={}, exp={})",
            claims.iat,
            claims.exp
        );
        self
    }
}

impl AdminTokenAssertions for String {
    fn assert_valid_admin_token(&self) -> &Self {
        self.as_str().assert_valid_admin_token();
        self
    }

    fn assert_key_id(&self, key_id: &str) -> &Self {
        self.as_str().assert_key_id(key_id);
        self
    }

    fn assert_lifetime(&self, seconds: i64) -> &Self {
        self.as_str().assert_lifetime(seconds);
        self
    }
}
