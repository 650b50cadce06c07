//! # vcon-cli — vCon Command-Line Interface
//!
//! Provides the `vcon` binary.
//!
//! ## Subcommands
//!
//! - `vcon new` — Create a document with telephone-number parties.
//! - `vcon attach` — Sign a recording published at a URL and add it as an
//!   external dialog entry.
//! - `vcon verify` — Check fetched content against an external entry.
//! - `vcon ots` — Raw one-time sign and verify over a file.
//!
//! ```bash
//! vcon new --tel +12345678901 --tel +19876543210 -o call.json
//! vcon attach call.json --content rec.wav --url https://media.example.com/rec.wav \
//!     --start "Sat, 14 May 2022 18:16:19 -0000" --duration 94.84 --party 0
//! vcon verify call.json --index 0 --content rec.wav
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from handlers; handlers return the
//!   process exit code.
//! - Handlers delegate to the library crates; no document logic here.

pub mod config;
pub mod document;
pub mod ots;
