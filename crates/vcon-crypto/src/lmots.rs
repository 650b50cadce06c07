//! # Leighton–Micali One-Time Signatures (RFC 8554 §4)
//!
//! LM-OTS signs a single message with a key whose security rests only on
//! SHA-256. The scheme itself comes from `lms-signature`, whose keys are
//! typed by parameter set (`SigningKey<LmsOtsSha256N32W8>` and so on). This
//! module puts those typed keys behind a runtime [`LmotsAlgorithm`] so a
//! parameter set can be picked from configuration or read off the wire.
//!
//! ## Security Invariant
//!
//! Each private key may sign exactly one message. Two signatures under one
//! key reveal enough chain positions to forge a third. [`LmotsPrivateKey::sign`]
//! consumes the key, so the compiler rejects reuse, and the underlying
//! `SigningKey` wipes its chain secrets once it has signed.
//!
//! ## Wire Formats
//!
//! - Public key: `u32str(type) || I || u32str(q) || K` (56 bytes).
//! - Signature: `u32str(type) || C || y[0] || ... || y[p-1]`.
//!
//! Private keys are derived per RFC 8554 Appendix A from `I`, `q` and a
//! 32-byte seed.

use std::str::FromStr;

use generic_array::GenericArray;
use lms_signature::error::LmsDeserializeError;
use lms_signature::ots::{
    LmsOtsMode, LmsOtsSha256N32W1, LmsOtsSha256N32W2, LmsOtsSha256N32W4, LmsOtsSha256N32W8,
    Signature, SigningKey, VerifyingKey,
};
use rand_core::{CryptoRngCore, OsRng, RngCore};
use signature::{RandomizedSignerMut, SignatureEncoding, Verifier};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Hash output length in bytes (`n`).
pub const N: usize = 32;

/// Key pair identifier length in bytes (`I`).
pub const IDENTIFIER_LEN: usize = 16;

/// Encoded public key length: typecode, `I`, `q`, `K`.
pub const PUBLIC_KEY_LEN: usize = 4 + IDENTIFIER_LEN + 4 + N;

/// Run `$body` with `$mode` bound to the `lms-signature` mode type of
/// `$algorithm`.
macro_rules! with_mode {
    ($algorithm:expr, |$mode:ident| $body:expr) => {
        match $algorithm {
            LmotsAlgorithm::Sha256N32W1 => {
                type $mode = LmsOtsSha256N32W1;
                $body
            }
            LmotsAlgorithm::Sha256N32W2 => {
                type $mode = LmsOtsSha256N32W2;
                $body
            }
            LmotsAlgorithm::Sha256N32W4 => {
                type $mode = LmsOtsSha256N32W4;
                $body
            }
            LmotsAlgorithm::Sha256N32W8 => {
                type $mode = LmsOtsSha256N32W8;
                $body
            }
        }
    };
}

/// An LM-OTS parameter set. All use SHA-256 with n = 32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LmotsAlgorithm {
    /// `LMOTS_SHA256_N32_W1`: largest signature, fastest chains.
    Sha256N32W1,
    /// `LMOTS_SHA256_N32_W2`.
    Sha256N32W2,
    /// `LMOTS_SHA256_N32_W4`.
    Sha256N32W4,
    /// `LMOTS_SHA256_N32_W8`: smallest signature (1124 bytes).
    #[default]
    Sha256N32W8,
}

impl LmotsAlgorithm {
    /// All supported parameter sets, in typecode order.
    pub const ALL: [LmotsAlgorithm; 4] = [
        LmotsAlgorithm::Sha256N32W1,
        LmotsAlgorithm::Sha256N32W2,
        LmotsAlgorithm::Sha256N32W4,
        LmotsAlgorithm::Sha256N32W8,
    ];

    /// The IANA typecode from RFC 8554 Table 2.
    pub fn typecode(self) -> u32 {
        match self {
            Self::Sha256N32W1 => 0x0000_0001,
            Self::Sha256N32W2 => 0x0000_0002,
            Self::Sha256N32W4 => 0x0000_0003,
            Self::Sha256N32W8 => 0x0000_0004,
        }
    }

    /// Look up a parameter set by typecode.
    pub fn from_typecode(code: u32) -> Result<Self, CryptoError> {
        Self::ALL
            .into_iter()
            .find(|a| a.typecode() == code)
            .ok_or(CryptoError::UnsupportedAlgorithm(code))
    }

    /// The registry name, e.g. `LMOTS_SHA256_N32_W8`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sha256N32W1 => "LMOTS_SHA256_N32_W1",
            Self::Sha256N32W2 => "LMOTS_SHA256_N32_W2",
            Self::Sha256N32W4 => "LMOTS_SHA256_N32_W4",
            Self::Sha256N32W8 => "LMOTS_SHA256_N32_W8",
        }
    }

    /// Winternitz parameter: bits per digit.
    pub fn w(self) -> usize {
        with_mode!(self, |Mode| <Mode as LmsOtsMode>::W)
    }

    /// Number of hash chains (`p`).
    pub fn p(self) -> usize {
        with_mode!(self, |Mode| <Mode as LmsOtsMode>::P)
    }

    /// Left shift applied to the checksum (`ls`).
    pub fn ls(self) -> usize {
        with_mode!(self, |Mode| <Mode as LmsOtsMode>::LS)
    }

    /// Encoded signature length: `4 + n * (p + 1)`.
    pub fn signature_len(self) -> usize {
        with_mode!(self, |Mode| <Mode as LmsOtsMode>::SIG_LEN)
    }
}

impl std::fmt::Display for LmotsAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LmotsAlgorithm {
    type Err = CryptoError;

    /// Accepts the registry name or its short form (`w1`, `w2`, `w4`, `w8`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == upper || a.as_str().ends_with(&format!("_{upper}")))
            .ok_or_else(|| CryptoError::UnknownAlgorithm(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Private key
// ---------------------------------------------------------------------------

enum TypedSigningKey {
    W1(SigningKey<LmsOtsSha256N32W1>),
    W2(SigningKey<LmsOtsSha256N32W2>),
    W4(SigningKey<LmsOtsSha256N32W4>),
    W8(SigningKey<LmsOtsSha256N32W8>),
}

/// Run `$body` with `$key` bound to whichever typed `SigningKey` is held.
macro_rules! with_signing_key {
    ($inner:expr, |$key:ident| $body:expr) => {
        match $inner {
            TypedSigningKey::W1($key) => $body,
            TypedSigningKey::W2($key) => $body,
            TypedSigningKey::W4($key) => $body,
            TypedSigningKey::W8($key) => $body,
        }
    };
}

/// A single-use LM-OTS private key.
///
/// Does not implement `Clone`, `Serialize`, or a revealing `Debug`.
pub struct LmotsPrivateKey {
    algorithm: LmotsAlgorithm,
    inner: TypedSigningKey,
}

impl LmotsPrivateKey {
    /// Generate a fresh key from OS randomness (random `I` and `SEED`, `q = 0`).
    pub fn generate(algorithm: LmotsAlgorithm) -> Self {
        let mut identifier = [0u8; IDENTIFIER_LEN];
        let mut seed = Zeroizing::new([0u8; N]);
        OsRng.fill_bytes(&mut identifier);
        OsRng.fill_bytes(&mut seed[..]);
        Self::from_seed(algorithm, identifier, 0, &seed)
    }

    /// Derive a key deterministically from `I`, `q`, and a 32-byte seed.
    pub fn from_seed(
        algorithm: LmotsAlgorithm,
        identifier: [u8; IDENTIFIER_LEN],
        q: u32,
        seed: &[u8; N],
    ) -> Self {
        let inner = match algorithm {
            LmotsAlgorithm::Sha256N32W1 => {
                TypedSigningKey::W1(SigningKey::new_from_seed(q, identifier, seed))
            }
            LmotsAlgorithm::Sha256N32W2 => {
                TypedSigningKey::W2(SigningKey::new_from_seed(q, identifier, seed))
            }
            LmotsAlgorithm::Sha256N32W4 => {
                TypedSigningKey::W4(SigningKey::new_from_seed(q, identifier, seed))
            }
            LmotsAlgorithm::Sha256N32W8 => {
                TypedSigningKey::W8(SigningKey::new_from_seed(q, identifier, seed))
            }
        };
        Self { algorithm, inner }
    }

    /// The parameter set of this key.
    pub fn algorithm(&self) -> LmotsAlgorithm {
        self.algorithm
    }

    /// Compute the matching public key (RFC 8554 Algorithm 1).
    pub fn public_key(&self) -> LmotsPublicKey {
        let bytes = with_signing_key!(&self.inner, |key| GenericArray::from(key.public()).to_vec());
        LmotsPublicKey {
            algorithm: self.algorithm,
            bytes,
        }
    }

    /// Sign `message` (RFC 8554 Algorithm 3), consuming the key.
    pub fn sign(self, message: &[u8]) -> Result<LmotsSignature, CryptoError> {
        self.sign_with_rng(&mut OsRng, message)
    }

    /// Sign with the randomizer `C` drawn from `rng`.
    fn sign_with_rng(
        self,
        rng: &mut impl CryptoRngCore,
        message: &[u8],
    ) -> Result<LmotsSignature, CryptoError> {
        let algorithm = self.algorithm;
        let bytes = with_signing_key!(self.inner, |key| {
            let mut key = key;
            key.try_sign_with_rng(rng, message)
                .map_err(|e| CryptoError::SigningFailed(format!("{algorithm}: {e}")))?
                .to_vec()
        });
        Ok(LmotsSignature { algorithm, bytes })
    }
}

impl std::fmt::Debug for LmotsPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LmotsPrivateKey(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Public key
// ---------------------------------------------------------------------------

/// An LM-OTS public key in its 56-byte wire form.
///
/// Only constructed from bytes that parse as a `VerifyingKey` of
/// `algorithm`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LmotsPublicKey {
    algorithm: LmotsAlgorithm,
    bytes: Vec<u8>,
}

impl LmotsPublicKey {
    /// The parameter set of this key.
    pub fn algorithm(&self) -> LmotsAlgorithm {
        self.algorithm
    }

    /// Encode as `u32str(type) || I || u32str(q) || K`.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Parse the encoding produced by [`to_bytes`](Self::to_bytes).
    ///
    /// Any structural problem is reported as `InvalidSignature`: a key that
    /// cannot be parsed can never validate anything.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let algorithm = algorithm_of(bytes, "public key")?;
        with_mode!(algorithm, |Mode| VerifyingKey::<Mode>::try_from(bytes).map(|_| ()))
            .map_err(|e| CryptoError::InvalidSignature(format!("{algorithm} public key: {e:?}")))?;
        Ok(Self {
            algorithm,
            bytes: bytes.to_vec(),
        })
    }

    /// Verify `signature` over `message` (RFC 8554 Algorithm 4a/4b).
    pub fn verify(&self, message: &[u8], signature: &LmotsSignature) -> Result<(), CryptoError> {
        if signature.algorithm != self.algorithm {
            return Err(CryptoError::InvalidSignature(format!(
                "signature type {} does not match public key type {}",
                signature.algorithm, self.algorithm
            )));
        }

        let algorithm = self.algorithm;
        let malformed = |what: &str, e: LmsDeserializeError| {
            CryptoError::InvalidSignature(format!("{algorithm} {what}: {e:?}"))
        };
        with_mode!(algorithm, |Mode| {
            let key = VerifyingKey::<Mode>::try_from(self.bytes.as_slice())
                .map_err(|e| malformed("public key", e))?;
            let signature = Signature::<Mode>::try_from(signature.bytes.as_slice())
                .map_err(|e| malformed("signature", e))?;
            key.verify(message, &signature)
        })
        .map_err(|_| {
            CryptoError::InvalidSignature("candidate public key does not match".to_string())
        })
    }
}

impl std::fmt::Debug for LmotsPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let k = &self.bytes[PUBLIC_KEY_LEN - N..];
        write!(f, "LmotsPublicKey({}, {}...)", self.algorithm, hex_prefix(k))
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// An LM-OTS signature in its wire form.
///
/// Only constructed from bytes that parse as a `Signature` of `algorithm`.
#[derive(Clone, PartialEq, Eq)]
pub struct LmotsSignature {
    algorithm: LmotsAlgorithm,
    bytes: Vec<u8>,
}

impl LmotsSignature {
    /// The parameter set of this signature.
    pub fn algorithm(&self) -> LmotsAlgorithm {
        self.algorithm
    }

    /// Encode as `u32str(type) || C || y[0] || ... || y[p-1]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Parse the encoding produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let algorithm = algorithm_of(bytes, "signature")?;
        with_mode!(algorithm, |Mode| Signature::<Mode>::try_from(bytes).map(|_| ())).map_err(
            |e| {
                CryptoError::InvalidSignature(format!(
                    "{algorithm} signature must be {} bytes, got {} ({e:?})",
                    algorithm.signature_len(),
                    bytes.len()
                ))
            },
        )?;
        Ok(Self {
            algorithm,
            bytes: bytes.to_vec(),
        })
    }
}

impl std::fmt::Debug for LmotsSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LmotsSignature({}, {}...)", self.algorithm, hex_prefix(&self.bytes[4..]))
    }
}

/// Read the leading typecode of an encoded key or signature.
fn algorithm_of(bytes: &[u8], what: &str) -> Result<LmotsAlgorithm, CryptoError> {
    let code = bytes
        .get(..4)
        .and_then(|head| <[u8; 4]>::try_from(head).ok())
        .map(u32::from_be_bytes)
        .ok_or_else(|| {
            CryptoError::InvalidSignature(format!("{what} too short: {} bytes", bytes.len()))
        })?;
    LmotsAlgorithm::from_typecode(code)
        .map_err(|e| CryptoError::InvalidSignature(format!("{what}: {e}")))
}

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
}
