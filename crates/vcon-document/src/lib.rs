//! # vcon-document — vCon Document Model
//!
//! The conversation-record container and its dialog entries:
//!
//! - **Container** (`vcon.rs`): [`Vcon`] with parties and dialog, JSON
//!   dump and load.
//!
//! - **Dialog** (`dialog.rs`): inline and external entries and the parsing
//!   rules that tell them apart.
//!
//! - **External content** (`external.rs`): signing content that lives at a
//!   URL with a one-time key, and verifying it later.
//!
//! - **Serialization bridge** (`serialize.rs`): text form of a single
//!   external entry.
//!
//! ## Security Invariant
//!
//! An external entry is only ever produced by signing the caller's exact
//! content bytes under a key generated for that one entry. Verification is
//! read-only and reports any mismatch as `InvalidSignature`.
//!
//! ## Crate Policy
//!
//! - Depends on `vcon-core` and `vcon-crypto` internally.
//! - Unknown JSON fields on dialog entries are tolerated on load.
//! - Known fields are typed; a missing required field is
//!   `MalformedDocument`, never a silent default.

pub mod dialog;
pub mod error;
pub mod external;
pub mod party;
pub mod serialize;
pub mod vcon;

pub use dialog::{BodyEncoding, DialogEntry, DialogType, InlineDialogEntry};
pub use error::DocumentError;
pub use external::{ExternalDialogEntry, ExternalRecording};
pub use party::Party;
pub use serialize::{deserialize, serialize};
pub use vcon::{Vcon, VCON_VERSION};
