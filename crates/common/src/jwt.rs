//! Compact token (JWT) parsing helpers.
//!
//! The signup service mints its own HS256 admin tokens byte-for-byte, so it
//! does not use a JWT library on the hot path. These helpers cover the other
//! direction: splitting a compact token into its three segments and decoding a
//! segment back into a typed value. They are used by token verification and by
//! tests that inspect issued tokens.
//!
//! # Usage
//!
//! ```rust
//! use common::jwt::{decode_segment, split_compact};
//!
//! // {"alg":"HS256"} . {"iat":1} . sig
//! let token = "eyJhbGciOiJIUzI1NiJ9.eyJpYXQiOjF9.c2ln";
//! let segments = split_compact(token).unwrap();
//! let claims: serde_json::Value = decode_segment(segments.claims).unwrap();
//! assert_eq!(claims["iat"], 1);
//! ```

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::de::DeserializeOwned;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum accepted compact token size in bytes (8KB).
///
/// Admin tokens are around 200 bytes. Anything larger is rejected before
/// base64 decoding.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

/// Separator between compact token segments.
pub const SEGMENT_SEPARATOR: char = '.';

// =============================================================================
// Error Types
// =============================================================================

/// Errors raised while taking a compact token apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtFormatError {
    /// Token size exceeds [`MAX_JWT_SIZE_BYTES`].
    #[error("Token exceeds maximum size of {MAX_JWT_SIZE_BYTES} bytes")]
    TokenTooLarge,

    /// Token does not have exactly three non-empty segments.
    #[error("Token must have exactly three segments")]
    MalformedToken,

    /// Segment is not unpadded URL-safe base64.
    #[error("Segment is not valid base64url: {0}")]
    InvalidEncoding(String),

    /// Segment decoded but is not the expected JSON shape.
    #[error("Segment is not valid JSON: {0}")]
    InvalidJson(String),
}

// =============================================================================
// Segments
// =============================================================================

/// The three segments of a compact token, still base64url-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactSegments<'a> {
    pub header: &'a str,
    pub claims: &'a str,
    pub signature: &'a str,
}

impl CompactSegments<'_> {
    /// Length of `header.claims`, the prefix covered by the signature.
    #[must_use]
    pub fn signing_input_len(&self) -> usize {
        self.header.len() + 1 + self.claims.len()
    }
}

/// Split a compact token into header, claims and signature segments.
///
/// # Errors
///
/// - [`JwtFormatError::TokenTooLarge`] if the token exceeds [`MAX_JWT_SIZE_BYTES`]
/// - [`JwtFormatError::MalformedToken`] unless there are exactly three
///   non-empty segments
pub fn split_compact(token: &str) -> Result<CompactSegments<'_>, JwtFormatError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        return Err(JwtFormatError::TokenTooLarge);
    }

    let mut parts = token.split(SEGMENT_SEPARATOR);
    let (Some(header), Some(claims), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(JwtFormatError::MalformedToken);
    };

    if header.is_empty() || claims.is_empty() || signature.is_empty() {
        return Err(JwtFormatError::MalformedToken);
    }

    Ok(CompactSegments {
        header,
        claims,
        signature,
    })
}

/// Decode a base64url segment to raw bytes.
///
/// # Errors
///
/// Returns [`JwtFormatError::InvalidEncoding`] if the segment contains padding
/// or characters outside the URL-safe alphabet.
pub fn decode_segment_bytes(segment: &str) -> Result<Vec<u8>, JwtFormatError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwtFormatError::InvalidEncoding(e.to_string()))
}

/// Decode a base64url JSON segment into `T`.
///
/// # Errors
///
/// Returns [`JwtFormatError::InvalidEncoding`] or [`JwtFormatError::InvalidJson`].
pub fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, JwtFormatError> {
    let bytes = decode_segment_bytes(segment)?;
    serde_json::from_slice(&bytes).map_err(|e| JwtFormatError::InvalidJson(e.to_string()))
}
