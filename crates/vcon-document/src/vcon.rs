//! # vCon Container
//!
//! The document that owns parties and dialog entries. All mutation goes
//! through `&mut self` and every mutating operation validates its input
//! before touching the document, so a failed call leaves it unchanged.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vcon_core::{
    encode_base64url, PartyRef, Rfc2822Timestamp, Timestamp, ValidationError,
};
use vcon_crypto::LmotsAlgorithm;

use crate::dialog::{BodyEncoding, DialogEntry, DialogType, InlineDialogEntry};
use crate::error::DocumentError;
use crate::external::ExternalRecording;
use crate::party::Party;

/// Version string written to new documents.
pub const VCON_VERSION: &str = "0.0.1";

/// A conversation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vcon {
    vcon: String,
    uuid: Uuid,
    created_at: Timestamp,
    #[serde(default)]
    parties: Vec<Party>,
    #[serde(default)]
    dialog: Vec<DialogEntry>,
}

impl Default for Vcon {
    fn default() -> Self {
        Self::new()
    }
}

impl Vcon {
    /// An empty document with a fresh UUID v4, created now.
    pub fn new() -> Self {
        Self {
            vcon: VCON_VERSION.to_string(),
            uuid: Uuid::new_v4(),
            created_at: Timestamp::now(),
            parties: Vec::new(),
            dialog: Vec::new(),
        }
    }

    /// Document format version.
    pub fn version(&self) -> &str {
        &self.vcon
    }

    /// Document identifier.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// When the document was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Conversation participants, in index order.
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    /// Dialog entries, in index order.
    pub fn dialog(&self) -> &[DialogEntry] {
        &self.dialog
    }

    // ------------------------------------------------------------------
    // Parties
    // ------------------------------------------------------------------

    /// Append a party identified by a telephone number. Returns its index.
    pub fn set_party_tel_url(&mut self, tel_url: &str) -> Result<usize, DocumentError> {
        let party = Party::from_tel_url(tel_url)?;
        self.add_party(party)
    }

    /// Append a party. Returns its index.
    pub fn add_party(&mut self, party: Party) -> Result<usize, DocumentError> {
        party.validate()?;
        self.parties.push(party);
        Ok(self.parties.len() - 1)
    }

    // ------------------------------------------------------------------
    // Dialog
    // ------------------------------------------------------------------

    /// Append a recording whose bytes are embedded as a base64url body.
    /// Returns the new entry's index.
    pub fn add_dialog_inline_recording(
        &mut self,
        content: &[u8],
        start: Rfc2822Timestamp,
        duration: f64,
        parties: PartyRef,
        mimetype: &str,
        filename: Option<&str>,
    ) -> Result<usize, DocumentError> {
        if content.is_empty() {
            return Err(ValidationError::EmptyContent.into());
        }
        check_duration(duration)?;
        self.check_parties(&parties)?;

        self.dialog.push(DialogEntry::Inline(InlineDialogEntry {
            dialog_type: DialogType::Recording,
            start,
            duration,
            parties,
            mimetype: mimetype.to_string(),
            filename: filename.map(str::to_string),
            body: encode_base64url(content),
            encoding: BodyEncoding::Base64Url,
        }));
        Ok(self.dialog.len() - 1)
    }

    /// Attach a recording stored at `url`, signing `content` under a fresh
    /// one-time key. Returns the new entry's index.
    ///
    /// `content` and `url` must be non-empty and every party index must name
    /// an existing party.
    #[allow(clippy::too_many_arguments)]
    pub fn attach_external(
        &mut self,
        content: &[u8],
        start: Rfc2822Timestamp,
        duration: f64,
        parties: PartyRef,
        url: &str,
        mimetype: &str,
        filename: &str,
    ) -> Result<usize, DocumentError> {
        let recording = ExternalRecording {
            start,
            duration,
            parties,
            url: url.to_string(),
            mimetype: mimetype.to_string(),
            filename: filename.to_string(),
        };
        self.attach_external_recording(content, recording, LmotsAlgorithm::default())
    }

    /// Like [`Vcon::attach_external`], with an explicit parameter set.
    pub fn attach_external_recording(
        &mut self,
        content: &[u8],
        recording: ExternalRecording,
        algorithm: LmotsAlgorithm,
    ) -> Result<usize, DocumentError> {
        self.check_parties(&recording.parties)?;
        let entry = recording.sign(content, algorithm)?;

        tracing::debug!(
            index = self.dialog.len(),
            url = %entry.url,
            algorithm = %algorithm,
            content_len = content.len(),
            "attached external recording"
        );

        self.dialog.push(DialogEntry::External(entry));
        Ok(self.dialog.len() - 1)
    }

    /// Check `content` against the signature of the external entry at
    /// `index`.
    pub fn verify_external(&self, index: usize, content: &[u8]) -> Result<(), DocumentError> {
        match self.entry(index)? {
            DialogEntry::Inline(_) => Err(DocumentError::NotExternalEntry { index }),
            DialogEntry::External(entry) => entry.verify(content).map_err(|err| {
                tracing::warn!(
                    index,
                    url = %entry.url,
                    content_len = content.len(),
                    "external content failed verification"
                );
                err
            }),
        }
    }

    /// Decoded body of the inline entry at `index`; `None` for external
    /// entries.
    pub fn inline_body(&self, index: usize) -> Result<Option<Vec<u8>>, DocumentError> {
        match self.entry(index)? {
            DialogEntry::Inline(entry) => entry.decode_body().map(Some),
            DialogEntry::External(_) => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Text form
    // ------------------------------------------------------------------

    /// Compact JSON.
    pub fn dumps(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON.
    pub fn dumps_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document, checking every dialog entry and party reference.
    pub fn loads(text: &str) -> Result<Self, DocumentError> {
        let vcon: Vcon = serde_json::from_str(text)
            .map_err(|e| DocumentError::MalformedDocument(e.to_string()))?;
        for (index, party) in vcon.parties.iter().enumerate() {
            party
                .validate()
                .map_err(|e| DocumentError::MalformedDocument(format!("party {index}: {e}")))?;
        }
        for (index, entry) in vcon.dialog.iter().enumerate() {
            entry
                .parties()
                .check_bounds(vcon.parties.len())
                .map_err(|e| {
                    DocumentError::MalformedDocument(format!("dialog entry {index}: {e}"))
                })?;
        }
        tracing::debug!(
            uuid = %vcon.uuid,
            parties = vcon.parties.len(),
            dialog = vcon.dialog.len(),
            "loaded vcon"
        );
        Ok(vcon)
    }

    fn entry(&self, index: usize) -> Result<&DialogEntry, DocumentError> {
        self.dialog
            .get(index)
            .ok_or(DocumentError::DialogIndexOutOfRange {
                index,
                len: self.dialog.len(),
            })
    }

    fn check_parties(&self, parties: &PartyRef) -> Result<(), ValidationError> {
        parties.check_bounds(self.parties.len())
    }
}

fn check_duration(duration: f64) -> Result<(), ValidationError> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidDuration(duration))
    }
}
