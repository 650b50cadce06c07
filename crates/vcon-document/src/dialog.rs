//! # Dialog Entries
//!
//! A vCon's `dialog` array mixes two kinds of entry:
//!
//! - **Inline** ([`InlineDialogEntry`]) — the content travels inside the
//!   document as `body`, with an `encoding` tag.
//! - **External** ([`ExternalDialogEntry`]) — the content lives elsewhere,
//!   named by `url`, and is authenticated by a one-time `signature` and
//!   `key`. The absence of `body` is what marks an entry as external.
//!
//! Both kinds are parsed through one permissive intermediate form and then
//! checked, so that a missing `url` or an unknown `type` surfaces as
//! [`DocumentError::MalformedDocument`] naming the problem rather than as an
//! opaque untagged-enum mismatch.

use serde::{Deserialize, Deserializer, Serialize};
use vcon_core::{decode_base64url, PartyRef, Rfc2822Timestamp};

use crate::error::DocumentError;
use crate::external::ExternalDialogEntry;

/// The kind of conversation segment a dialog entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogType {
    /// Audio or video recording.
    Recording,
    /// Text messages (chat, SMS, email body).
    Text,
    /// Call transfer between parties.
    Transfer,
    /// A conversation that failed to connect or was cut short.
    Incomplete,
}

impl DialogType {
    /// The JSON tag for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            DialogType::Recording => "recording",
            DialogType::Text => "text",
            DialogType::Transfer => "transfer",
            DialogType::Incomplete => "incomplete",
        }
    }

    fn parse(tag: &str) -> Option<Self> {
        [
            DialogType::Recording,
            DialogType::Text,
            DialogType::Transfer,
            DialogType::Incomplete,
        ]
        .into_iter()
        .find(|t| t.as_str() == tag)
    }
}

impl std::fmt::Display for DialogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an inline `body` is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyEncoding {
    /// Unpadded base64url of the raw bytes.
    #[serde(rename = "base64url")]
    Base64Url,
    /// A JSON document carried as a string.
    #[serde(rename = "json")]
    Json,
    /// Plain text, no transformation.
    #[serde(rename = "none")]
    None,
}

impl BodyEncoding {
    /// The JSON tag for this encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            BodyEncoding::Base64Url => "base64url",
            BodyEncoding::Json => "json",
            BodyEncoding::None => "none",
        }
    }

    fn parse(tag: &str) -> Option<Self> {
        [BodyEncoding::Base64Url, BodyEncoding::Json, BodyEncoding::None]
            .into_iter()
            .find(|e| e.as_str() == tag)
    }
}

/// A dialog entry whose content is embedded in the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineDialogEntry {
    /// Kind of segment.
    #[serde(rename = "type")]
    pub dialog_type: DialogType,
    /// When the segment began.
    pub start: Rfc2822Timestamp,
    /// Length in seconds.
    pub duration: f64,
    /// Participating parties.
    pub parties: PartyRef,
    /// MIME type of the decoded body.
    pub mimetype: String,
    /// Original file name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Encoded content.
    pub body: String,
    /// Encoding applied to `body`.
    pub encoding: BodyEncoding,
}

impl InlineDialogEntry {
    /// Decode `body` back to the original bytes.
    pub fn decode_body(&self) -> Result<Vec<u8>, DocumentError> {
        match self.encoding {
            BodyEncoding::Base64Url => Ok(decode_base64url(&self.body)?),
            BodyEncoding::Json | BodyEncoding::None => Ok(self.body.as_bytes().to_vec()),
        }
    }
}

/// One entry of a vCon's `dialog` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DialogEntry {
    /// Content embedded as `body`.
    Inline(InlineDialogEntry),
    /// Content referenced by `url` and authenticated by signature.
    External(ExternalDialogEntry),
}

impl DialogEntry {
    /// Kind of segment.
    pub fn dialog_type(&self) -> DialogType {
        match self {
            DialogEntry::Inline(e) => e.dialog_type,
            DialogEntry::External(e) => e.dialog_type,
        }
    }

    /// Participating parties.
    pub fn parties(&self) -> &PartyRef {
        match self {
            DialogEntry::Inline(e) => &e.parties,
            DialogEntry::External(e) => &e.parties,
        }
    }

    /// Returns `true` if the content is stored outside the document.
    pub fn is_external(&self) -> bool {
        matches!(self, DialogEntry::External(_))
    }

    /// The external descriptor, if this entry is external.
    pub fn as_external(&self) -> Option<&ExternalDialogEntry> {
        match self {
            DialogEntry::External(e) => Some(e),
            DialogEntry::Inline(_) => None,
        }
    }

    /// The inline entry, if this entry carries a body.
    pub fn as_inline(&self) -> Option<&InlineDialogEntry> {
        match self {
            DialogEntry::Inline(e) => Some(e),
            DialogEntry::External(_) => None,
        }
    }

    /// Check the fields of a parsed entry and build the typed form.
    pub(crate) fn from_raw(raw: RawDialogEntry) -> Result<Self, DocumentError> {
        let dialog_type = match raw.dialog_type.as_deref() {
            None => return Err(malformed("dialog entry is missing \"type\"")),
            Some(tag) => DialogType::parse(tag).ok_or_else(|| {
                DocumentError::MalformedDocument(format!("unrecognized dialog type \"{tag}\""))
            })?,
        };
        let start = raw.start.ok_or_else(|| missing("start"))?;
        let duration = raw.duration.ok_or_else(|| missing("duration"))?;
        let parties = raw.parties.ok_or_else(|| missing("parties"))?;
        let mimetype = raw.mimetype.ok_or_else(|| missing("mimetype"))?;

        match raw.body {
            Some(body) => {
                if raw.url.is_some() || raw.signature.is_some() || raw.key.is_some() {
                    return Err(malformed(
                        "inline dialog entry must not carry url, signature, or key",
                    ));
                }
                let encoding = match raw.encoding.as_deref() {
                    None => return Err(missing("encoding")),
                    Some(tag) => BodyEncoding::parse(tag).ok_or_else(|| {
                        DocumentError::MalformedDocument(format!(
                            "unrecognized body encoding \"{tag}\""
                        ))
                    })?,
                };
                Ok(DialogEntry::Inline(InlineDialogEntry {
                    dialog_type,
                    start,
                    duration,
                    parties,
                    mimetype,
                    filename: raw.filename,
                    body,
                    encoding,
                }))
            }
            None => {
                let entry = ExternalDialogEntry {
                    dialog_type,
                    start,
                    duration,
                    parties,
                    url: raw.url.ok_or_else(|| missing("url"))?,
                    mimetype,
                    filename: raw.filename.ok_or_else(|| missing("filename"))?,
                    signature: raw.signature.ok_or_else(|| missing("signature"))?,
                    key: raw.key.ok_or_else(|| missing("key"))?,
                };
                entry.check_required_fields()?;
                Ok(DialogEntry::External(entry))
            }
        }
    }
}

impl<'de> Deserialize<'de> for DialogEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDialogEntry::deserialize(deserializer)?;
        DialogEntry::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

/// Permissive parse target: every field optional, checked by `from_raw`.
///
/// Unknown fields are ignored so that documents written by newer producers
/// still load.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDialogEntry {
    #[serde(rename = "type")]
    dialog_type: Option<String>,
    start: Option<Rfc2822Timestamp>,
    duration: Option<f64>,
    parties: Option<PartyRef>,
    mimetype: Option<String>,
    filename: Option<String>,
    body: Option<String>,
    encoding: Option<String>,
    url: Option<String>,
    signature: Option<String>,
    key: Option<String>,
}

fn malformed(msg: &str) -> DocumentError {
    DocumentError::MalformedDocument(msg.to_string())
}

fn missing(field: &str) -> DocumentError {
    DocumentError::MalformedDocument(format!("dialog entry is missing \"{field}\""))
}
