//! # External Content Authentication
//!
//! A vCon may reference a recording that lives outside the document. The
//! entry then carries the location (`url`) instead of the bytes, plus a
//! one-time `signature` over the exact bytes and the `key` that verifies it.
//!
//! ## Security Invariant
//!
//! The signature is computed over the raw content bytes exactly as the
//! caller supplied them. Any change to those bytes, to the signature text,
//! or to the key text makes [`ExternalDialogEntry::verify`] fail with
//! [`DocumentError::InvalidSignature`]. Each entry is signed under its own
//! freshly generated key and the private half never leaves
//! [`ExternalRecording::sign`].

use serde::{Deserialize, Deserializer, Serialize};
use vcon_core::{PartyRef, Rfc2822Timestamp, ValidationError};
use vcon_crypto::LmotsAlgorithm;

use crate::dialog::{DialogEntry, DialogType, RawDialogEntry};
use crate::error::DocumentError;

/// A dialog entry whose content is stored outside the document.
///
/// Field order here is the JSON field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalDialogEntry {
    /// Kind of segment; `recording` for entries created by this crate.
    #[serde(rename = "type")]
    pub dialog_type: DialogType,
    /// When the segment began, as given by the producer.
    pub start: Rfc2822Timestamp,
    /// Length in seconds.
    pub duration: f64,
    /// Participating parties.
    pub parties: PartyRef,
    /// Where the content can be fetched.
    pub url: String,
    /// MIME type of the content.
    pub mimetype: String,
    /// Original file name.
    pub filename: String,
    /// Base64url one-time signature over the content.
    pub signature: String,
    /// Base64url one-time public key.
    pub key: String,
}

impl ExternalDialogEntry {
    /// Check `content` against this entry's signature and key.
    ///
    /// Fails with [`DocumentError::InvalidSignature`] if the content differs
    /// by even one byte from what was signed.
    pub fn verify(&self, content: &[u8]) -> Result<(), DocumentError> {
        vcon_crypto::verify(content, &self.signature, &self.key)?;
        Ok(())
    }

    /// The fields an external entry cannot do without.
    pub(crate) fn check_required_fields(&self) -> Result<(), DocumentError> {
        for (name, value) in [
            ("url", &self.url),
            ("signature", &self.signature),
            ("key", &self.key),
        ] {
            if value.trim().is_empty() {
                return Err(DocumentError::MalformedDocument(format!(
                    "external dialog entry has empty \"{name}\""
                )));
            }
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for ExternalDialogEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDialogEntry::deserialize(deserializer)?;
        match DialogEntry::from_raw(raw).map_err(serde::de::Error::custom)? {
            DialogEntry::External(entry) => Ok(entry),
            DialogEntry::Inline(_) => Err(serde::de::Error::custom(
                "expected an external dialog entry, found an inline body",
            )),
        }
    }
}

/// Metadata describing external content that is about to be signed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalRecording {
    /// When the recording began.
    pub start: Rfc2822Timestamp,
    /// Length in seconds; finite and non-negative.
    pub duration: f64,
    /// Participating parties.
    pub parties: PartyRef,
    /// Where the content will be published.
    pub url: String,
    /// MIME type of the content.
    pub mimetype: String,
    /// Original file name.
    pub filename: String,
}

impl ExternalRecording {
    /// Check the metadata and the content before signing.
    pub fn validate(&self, content: &[u8]) -> Result<(), ValidationError> {
        if content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        if self.url.trim().is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ValidationError::InvalidDuration(self.duration));
        }
        if self.parties.is_empty() {
            return Err(ValidationError::EmptyPartyRef);
        }
        Ok(())
    }

    /// Sign `content` under a fresh one-time key and build the dialog entry.
    pub fn sign(
        self,
        content: &[u8],
        algorithm: LmotsAlgorithm,
    ) -> Result<ExternalDialogEntry, DocumentError> {
        self.validate(content)?;
        let signed = vcon_crypto::generate_and_sign_with(algorithm, content)?;
        Ok(ExternalDialogEntry {
            dialog_type: DialogType::Recording,
            start: self.start,
            duration: self.duration,
            parties: self.parties,
            url: self.url,
            mimetype: self.mimetype,
            filename: self.filename,
            signature: signed.signature,
            key: signed.key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording() -> ExternalRecording {
        ExternalRecording {
            start: "Sat, 14 May 2022 18:16:19 -0000".parse().unwrap(),
            duration: 94.84,
            parties: PartyRef::Single(0),
            url: "https://example.com/rec.wav".to_string(),
            mimetype: "audio/x-wav".to_string(),
            filename: "rec.wav".to_string(),
        }
    }

    #[test]
    fn signed_entry_verifies_its_content() {
        let content = b"RIFF....WAVEfmt ";
        let entry = recording().sign(content, LmotsAlgorithm::default()).unwrap();
        assert_eq!(entry.dialog_type, DialogType::Recording);
        entry.verify(content).unwrap();
        assert!(entry.verify(b"RIFF....WAVEfmt!").unwrap_err().is_invalid_signature());
    }

    #[test]
    fn empty_content_is_rejected() {
        let err = recording().sign(b"", LmotsAlgorithm::default()).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Validation(ValidationError::EmptyContent)
        ));
    }

    #[test]
    fn blank_url_is_rejected() {
        let mut rec = recording();
        rec.url = "  ".to_string();
        assert_eq!(rec.validate(b"x"), Err(ValidationError::EmptyUrl));
    }

    #[test]
    fn bad_durations_are_rejected() {
        for d in [-1.0, f64::NAN, f64::INFINITY] {
            let mut rec = recording();
            rec.duration = d;
            assert!(matches!(
                rec.validate(b"x"),
                Err(ValidationError::InvalidDuration(_))
            ));
        }
    }

    #[test]
    fn zero_duration_is_accepted() {
        let mut rec = recording();
        rec.duration = 0.0;
        assert!(rec.validate(b"x").is_ok());
    }

    #[test]
    fn empty_party_list_is_rejected() {
        let mut rec = recording();
        rec.parties = PartyRef::Many(vec![]);
        assert_eq!(rec.validate(b"x"), Err(ValidationError::EmptyPartyRef));
    }

    #[test]
    fn entry_with_tampered_key_fails() {
        let content = b"abc";
        let mut entry = recording().sign(content, LmotsAlgorithm::Sha256N32W4).unwrap();
        entry.key.replace_range(0..1, "B");
        assert!(entry.verify(content).unwrap_err().is_invalid_signature());
    }

    #[test]
    fn serialized_field_order() {
        let entry = recording().sign(b"abc", LmotsAlgorithm::default()).unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        let order: Vec<usize> = [
            "\"type\"",
            "\"start\"",
            "\"duration\"",
            "\"parties\"",
            "\"url\"",
            "\"mimetype\"",
            "\"filename\"",
            "\"signature\"",
            "\"key\"",
        ]
        .iter()
        .map(|k| json.find(k).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn deserializing_inline_as_external_fails() {
        let json = r#"{
            "type": "recording",
            "start": "Sat, 14 May 2022 18:16:19 -0000",
            "duration": 1.0,
            "parties": 0,
            "mimetype": "audio/x-wav",
            "body": "AA",
            "encoding": "base64url"
        }"#;
        assert!(serde_json::from_str::<ExternalDialogEntry>(json).is_err());
    }
}
