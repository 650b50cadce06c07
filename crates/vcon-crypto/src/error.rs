//! # Cryptographic Error Types
//!
//! Structured errors for the one-time signature engine.
//! Uses `thiserror` for ergonomic error definitions with diagnostic context.

use thiserror::Error;

/// Errors from one-time signature operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature does not verify: wrong message, wrong key, or a
    /// malformed signature/key encoding. Conclusive; not retryable.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// The typecode does not name a supported LM-OTS parameter set.
    #[error("unsupported LM-OTS typecode: {0:#x}")]
    UnsupportedAlgorithm(u32),

    /// The signing primitive refused the key, e.g. because it had already
    /// signed. Never produced for a freshly generated key.
    #[error("one-time signing failed: {0}")]
    SigningFailed(String),

    /// A parameter set name could not be parsed.
    #[error("unknown LM-OTS parameter set: \"{0}\"")]
    UnknownAlgorithm(String),
}

impl CryptoError {
    /// Returns `true` for verification failures.
    pub fn is_invalid_signature(&self) -> bool {
        matches!(self, CryptoError::InvalidSignature(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_signature_display() {
        let err = CryptoError::InvalidSignature("candidate key mismatch".to_string());
        assert!(format!("{err}").contains("candidate key mismatch"));
        assert!(err.is_invalid_signature());
    }

    #[test]
    fn unsupported_algorithm_display_is_hex() {
        let err = CryptoError::UnsupportedAlgorithm(0x1f);
        assert!(format!("{err}").contains("0x1f"));
        assert!(!err.is_invalid_signature());
    }

    #[test]
    fn signing_failed_is_not_a_verification_failure() {
        let err = CryptoError::SigningFailed("key already used".to_string());
        assert!(format!("{err}").contains("key already used"));
        assert!(!err.is_invalid_signature());
    }

    #[test]
    fn unknown_algorithm_display() {
        let err = CryptoError::UnknownAlgorithm("w3".to_string());
        assert!(format!("{err}").contains("\"w3\""));
    }
}
