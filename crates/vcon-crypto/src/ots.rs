//! # One-Time Signature Engine
//!
//! The text-level API dialog entries are built on. Keys and signatures
//! cross this boundary only as unpadded base64url strings, the same
//! encoding vCon uses for inline bodies.
//!
//! [`generate_and_sign`] derives a fresh key for every call and drops the
//! private half before returning, so a caller has nothing it could sign
//! with a second time. [`verify`] reports every failure, including
//! undecodable input, as [`CryptoError::InvalidSignature`].

use vcon_core::{decode_base64url, encode_base64url};

use crate::error::CryptoError;
use crate::lmots::{LmotsAlgorithm, LmotsPrivateKey, LmotsPublicKey, LmotsSignature};

/// The public outputs of signing one piece of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedContent {
    /// Base64url-encoded LM-OTS public key.
    pub key: String,
    /// Base64url-encoded LM-OTS signature.
    pub signature: String,
}

/// Sign `message` under a fresh `LMOTS_SHA256_N32_W8` key.
pub fn generate_and_sign(message: &[u8]) -> Result<SignedContent, CryptoError> {
    generate_and_sign_with(LmotsAlgorithm::default(), message)
}

/// Sign `message` under a fresh key of the given parameter set.
pub fn generate_and_sign_with(
    algorithm: LmotsAlgorithm,
    message: &[u8],
) -> Result<SignedContent, CryptoError> {
    let private_key = LmotsPrivateKey::generate(algorithm);
    let public_key = private_key.public_key();
    let signature = private_key.sign(message)?;

    tracing::debug!(
        algorithm = %algorithm,
        message_len = message.len(),
        "signed content with one-time key"
    );

    Ok(SignedContent {
        key: encode_base64url(&public_key.to_bytes()),
        signature: encode_base64url(&signature.to_bytes()),
    })
}

/// Verify a base64url `signature` over `message` under a base64url `key`.
pub fn verify(message: &[u8], signature: &str, key: &str) -> Result<(), CryptoError> {
    let key_bytes = decode_base64url(key)
        .map_err(|e| CryptoError::InvalidSignature(format!("public key encoding: {e}")))?;
    let sig_bytes = decode_base64url(signature)
        .map_err(|e| CryptoError::InvalidSignature(format!("signature encoding: {e}")))?;

    let public_key = LmotsPublicKey::from_bytes(&key_bytes)?;
    let signature = LmotsSignature::from_bytes(&sig_bytes)?;

    public_key.verify(message, &signature).map_err(|e| {
        tracing::debug!(
            algorithm = %public_key.algorithm(),
            message_len = message.len(),
            "one-time signature rejected"
        );
        e
    })
}
