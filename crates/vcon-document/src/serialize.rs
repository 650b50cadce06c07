//! Text form of a single external dialog entry.
//!
//! Signature and key are already base64url text, so they pass through the
//! JSON layer untouched. Parse failures of any kind are reported as
//! [`DocumentError::MalformedDocument`].

use crate::error::DocumentError;
use crate::external::ExternalDialogEntry;

/// Render an external entry as a JSON object.
pub fn serialize(entry: &ExternalDialogEntry) -> Result<String, DocumentError> {
    Ok(serde_json::to_string(entry)?)
}

/// Parse a JSON object produced by [`serialize`].
pub fn deserialize(text: &str) -> Result<ExternalDialogEntry, DocumentError> {
    serde_json::from_str(text).map_err(|e| DocumentError::MalformedDocument(e.to_string()))
}
