#![deny(missing_docs)]

//! # vcon-core — Foundational Types for vCon Documents
//!
//! This crate defines the leaf types that every other crate in the workspace
//! depends on. It has no internal crate dependencies — only `serde`,
//! `serde_json`, `base64`, `thiserror`, and `chrono` from the ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Timestamps are preserved verbatim.** [`Rfc2822Timestamp`] keeps the
//!    exact string it was parsed from, so a dialog `start` such as
//!    `Sat, 14 May 2022 18:16:19 -0000` survives a dump/load cycle byte for
//!    byte even though chrono would render the offset as `+0000`.
//!
//! 2. **One wire encoding for binary material.** Signatures, public keys,
//!    and inline bodies all pass through [`encode_base64url`] /
//!    [`decode_base64url`]. Decoding is strict: no padding, no foreign
//!    alphabet, no dangling trailing bits.
//!
//! 3. **Party references are indices.** [`PartyRef`] is a weak reference
//!    into the owning document's party list; this crate never resolves it.

pub mod encoding;
pub mod error;
pub mod mime;
pub mod party;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use encoding::{decode_base64url, encode_base64url, BASE64URL_ENCODING};
pub use error::{EncodingError, ValidationError};
pub use party::PartyRef;
pub use temporal::{Rfc2822Timestamp, Timestamp};
