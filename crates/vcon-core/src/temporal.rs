//! # Temporal Types
//!
//! Two timestamp types with different jobs:
//!
//! - [`Rfc2822Timestamp`] — the `start` of a dialog entry. vCon carries it
//!   as an RFC 2822 string and consumers compare it as a string, so the
//!   original text is kept alongside the parsed value and is what gets
//!   serialized.
//! - [`Timestamp`] — a UTC instant for document metadata such as
//!   `created_at`, serialized as RFC 3339 with a `Z` suffix.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// An RFC 2822 date-time that remembers its exact textual form.
///
/// Equality compares the text, so `-0000` and `+0000` are distinct values
/// even though they denote the same instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rfc2822Timestamp {
    raw: String,
    parsed: DateTime<FixedOffset>,
}

impl Rfc2822Timestamp {
    /// Parse an RFC 2822 date-time string, keeping it verbatim.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let parsed = DateTime::parse_from_rfc2822(value).map_err(|e| {
            ValidationError::InvalidTimestamp {
                value: value.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            raw: value.to_string(),
            parsed,
        })
    }

    /// Build from a chrono value; the text form is chrono's RFC 2822 rendering.
    pub fn from_datetime(dt: DateTime<FixedOffset>) -> Self {
        Self {
            raw: dt.to_rfc2822(),
            parsed: dt,
        }
    }

    /// The current time in UTC.
    pub fn now() -> Self {
        Self::from_datetime(DateTime::<FixedOffset>::from(Utc::now()))
    }

    /// The exact text this timestamp was built from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed date-time with its original offset.
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.parsed
    }

    /// The instant in UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.parsed.with_timezone(&Utc)
    }
}

impl FromStr for Rfc2822Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Rfc2822Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Rfc2822Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Rfc2822Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A UTC instant.
///
/// Serializes to RFC 3339 with a `Z` suffix (e.g., `2026-01-15T12:00:00Z`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const CALL_START: &str = "Sat, 14 May 2022 18:16:19 -0000";

    #[test]
    fn parse_preserves_negative_zero_offset() {
        let ts = Rfc2822Timestamp::parse(CALL_START).unwrap();
        assert_eq!(ts.as_str(), CALL_START);
        assert_eq!(ts.to_string(), CALL_START);
    }

    #[test]
    fn parse_computes_instant() {
        let ts = Rfc2822Timestamp::parse(CALL_START).unwrap();
        let expected = Utc.with_ymd_and_hms(2022, 5, 14, 18, 16, 19).unwrap();
        assert_eq!(ts.to_utc(), expected);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = Rfc2822Timestamp::parse("not a date").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
    }

    #[test]
    fn parse_rejects_rfc3339() {
        assert!(Rfc2822Timestamp::parse("2022-05-14T18:16:19Z").is_err());
    }

    #[test]
    fn serde_roundtrip_is_verbatim() {
        let ts: Rfc2822Timestamp = CALL_START.parse().unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, format!("\"{CALL_START}\""));
        let back: Rfc2822Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<Rfc2822Timestamp>("\"tomorrow\"").is_err());
    }

    #[test]
    fn from_datetime_renders_rfc2822() {
        let dt = DateTime::<FixedOffset>::from(Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap());
        let ts = Rfc2822Timestamp::from_datetime(dt);
        assert!(ts.as_str().starts_with("Mon, "));
        assert!(ts.as_str().ends_with("03:04:05 +0000"));
        assert_eq!(Rfc2822Timestamp::parse(ts.as_str()).unwrap(), ts);
    }

    #[test]
    fn timestamp_display_has_z_suffix() {
        let ts = Timestamp::from_datetime(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap());
        assert_eq!(ts.to_string(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn timestamp_serde_roundtrip() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
