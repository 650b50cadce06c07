//! # vcon-crypto — One-Time Signatures for External Content
//!
//! A vCon dialog entry may point at a recording by URL instead of carrying
//! it inline. The entry then carries a detached proof that lets anyone who
//! later fetches the bytes check they were not altered. This crate provides
//! that proof:
//!
//! - **LM-OTS** ([`lmots`]) — the Leighton–Micali one-time signature scheme
//!   of RFC 8554 §4 over SHA-256, in all four Winternitz parameter sets,
//!   provided by `lms-signature` and selected at runtime by
//!   [`LmotsAlgorithm`]. Security reduces to the hash function alone.
//! - **Text engine** ([`ots`]) — [`generate_and_sign`] and [`verify`], the
//!   base64url-in, base64url-out API that dialog entries are built on.
//!
//! ## Security Invariants
//!
//! - A private key signs exactly one message. [`LmotsPrivateKey::sign`]
//!   takes `self` by value, so a second signature with the same key does
//!   not compile. Generated seeds are zeroized, and the chain secrets are
//!   wiped by the signing key once it has signed.
//! - [`generate_and_sign`] never exposes private key material.
//! - Verification of hostile input never panics; every malformed encoding,
//!   length, or type code is reported as [`CryptoError::InvalidSignature`].
//!
//! ## Crate Policy
//!
//! - Depends only on `vcon-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   SHA-256 and the real scheme.

pub mod error;
pub mod lmots;
pub mod ots;

// Re-export primary types.
pub use error::CryptoError;
pub use lmots::{LmotsAlgorithm, LmotsPrivateKey, LmotsPublicKey, LmotsSignature};
pub use ots::{generate_and_sign, generate_and_sign_with, verify, SignedContent};
