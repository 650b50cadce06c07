//! # Wire Encoding for Binary Material
//!
//! One-time signatures, public keys, and inline dialog bodies are binary.
//! Inside a vCon document they travel as base64url (RFC 4648 §5) without
//! padding, which is safe inside JSON strings and URLs alike.
//!
//! ## Strictness
//!
//! The decoder rejects `=` padding, characters from the standard alphabet
//! (`+`, `/`), whitespace, and encodings whose final symbol carries non-zero
//! trailing bits. Every single-character change to a valid encoding
//! therefore either fails to decode or decodes to different bytes.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::EncodingError;

/// The `encoding` tag written next to inline bodies.
pub const BASE64URL_ENCODING: &str = "base64url";

/// Encode bytes as unpadded base64url.
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded base64url text.
pub fn decode_base64url(text: &str) -> Result<Vec<u8>, EncodingError> {
    URL_SAFE_NO_PAD
        .decode(text)
        .map_err(|e| EncodingError::Base64Url(e.to_string()))
}
