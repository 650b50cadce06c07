//! # Document Error Types
//!
//! Every failure a caller of the document API can observe. Each kind is a
//! distinct variant so that callers can decide, for example, to re-fetch
//! content after `InvalidSignature` but to report `MalformedDocument`
//! straight to the operator.

use thiserror::Error;
use vcon_core::{EncodingError, ValidationError};
use vcon_crypto::CryptoError;

/// Errors from vCon document operations.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// External content did not match its one-time signature, or the
    /// signature/key text was malformed. Conclusive; not retryable.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Verification was requested for an entry that carries an inline body.
    #[error("dialog entry {index} is not external content (it carries an inline body)")]
    NotExternalEntry {
        /// Index of the offending dialog entry.
        index: usize,
    },

    /// A document or dialog entry could not be parsed, or lacks required fields.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// No dialog entry exists at the requested index.
    #[error("dialog index {index} out of range (document has {len} dialog entries)")]
    DialogIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of dialog entries in the document.
        len: usize,
    },

    /// Caller-supplied input failed validation; nothing was changed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An inline body could not be decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// The one-time signing primitive refused to sign.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Serializing the document failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CryptoError> for DocumentError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidSignature(msg) => DocumentError::InvalidSignature(msg),
            CryptoError::SigningFailed(msg) => DocumentError::Signing(msg),
            other => DocumentError::InvalidSignature(other.to_string()),
        }
    }
}

impl DocumentError {
    /// Returns `true` if external content failed verification.
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, DocumentError::InvalidSignature(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_invalid_signature_maps_through() {
        let err = DocumentError::from(CryptoError::InvalidSignature("mismatch".to_string()));
        assert!(err.is_invalid_signature());
        assert_eq!(format!("{err}"), "invalid signature: mismatch");
    }

    #[test]
    fn crypto_structural_errors_map_to_invalid_signature() {
        let err = DocumentError::from(CryptoError::UnsupportedAlgorithm(9));
        assert!(err.is_invalid_signature());
    }

    #[test]
    fn crypto_signing_failure_is_not_invalid_signature() {
        let err = DocumentError::from(CryptoError::SigningFailed("used key".to_string()));
        assert!(matches!(err, DocumentError::Signing(_)));
        assert!(!err.is_invalid_signature());
    }

    #[test]
    fn not_external_entry_display() {
        let err = DocumentError::NotExternalEntry { index: 2 };
        assert!(format!("{err}").contains("dialog entry 2"));
        assert!(!err.is_invalid_signature());
    }

    #[test]
    fn index_out_of_range_display() {
        let err = DocumentError::DialogIndexOutOfRange { index: 4, len: 1 };
        let msg = format!("{err}");
        assert!(msg.contains('4'));
        assert!(msg.contains("1 dialog entries"));
    }

    #[test]
    fn validation_from_conversion() {
        let err = DocumentError::from(ValidationError::EmptyUrl);
        assert!(matches!(err, DocumentError::Validation(ValidationError::EmptyUrl)));
    }
}
