//! # Error Hierarchy
//!
//! Structured error types shared by every vCon crate, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Errors carry the offending input so that a caller can tell a malformed
//! timestamp from an empty URL without parsing the message text.

use thiserror::Error;

/// Validation errors for values supplied by callers.
///
/// Raised before any state is mutated: an operation that fails validation
/// leaves the document exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Content to be signed or embedded was empty.
    #[error("content must be non-empty")]
    EmptyContent,

    /// An external-content URL was empty.
    #[error("external content url must be non-empty")]
    EmptyUrl,

    /// Duration is negative or not a finite number.
    #[error("invalid duration: {0} (expected a finite, non-negative number of seconds)")]
    InvalidDuration(f64),

    /// Timestamp string is not a valid RFC 2822 date-time.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A party reference listed no party indices.
    #[error("party reference must name at least one party")]
    EmptyPartyRef,

    /// A party reference points past the end of the party list.
    #[error("party index {index} out of range (document has {count} parties)")]
    PartyIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of parties in the document.
        count: usize,
    },

    /// A telephone URL had no number after the optional `tel:` scheme.
    #[error("invalid tel URL: \"{0}\"")]
    InvalidTelUrl(String),

    /// A party carried no identifying field at all.
    #[error("party must have at least one of tel, mailto, or name")]
    EmptyParty,
}

/// Errors decoding text-encoded binary material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The input is not valid unpadded base64url.
    #[error("invalid base64url: {0}")]
    Base64Url(String),
}
