//! Hex and base64url codecs used by admin token issuance.
//!
//! Admin key secrets arrive hex-encoded; token segments leave as unpadded
//! URL-safe base64. Both conversions must be byte-exact.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("Hex string has odd length {0}")]
    OddLength(usize),

    #[error("Invalid hex character {character:?} at index {index}")]
    InvalidHex { character: char, index: usize },

    #[error("Invalid base64url input: {0}")]
    InvalidBase64(String),
}

/// Decode a hex string into bytes, two characters per byte, in order.
///
/// Upper and lower case digits are accepted. The output is always
/// `hex.len() / 2` bytes long.
pub fn hex_decode(hex: &str) -> Result<Vec<u8>, EncodingError> {
    if hex.len() % 2 != 0 {
        return Err(EncodingError::OddLength(hex.len()));
    }

    hex::decode(hex).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => EncodingError::InvalidHex {
            character: c,
            index,
        },
        _ => EncodingError::OddLength(hex.len()),
    })
}

/// Encode bytes as URL-safe base64 without padding or line breaks.
pub fn base64url_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded URL-safe base64.
pub fn base64url_decode(text: &str) -> Result<Vec<u8>, EncodingError> {
    URL_SAFE_NO_PAD
        .decode(text)
        .map_err(|e| EncodingError::InvalidBase64(e.to_string()))
}
