//! # Document Subcommands
//!
//! `vcon new`, `vcon attach`, and `vcon verify`. Handlers read and write
//! files and print a one-line status; the document logic itself lives in
//! `vcon-document`.
//!
//! ## Exit Codes
//!
//! - `0` — success.
//! - `1` — any error (unreadable file, malformed document, bad arguments).
//! - `2` — `verify` found that the content does not match its signature.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use vcon_core::{PartyRef, Rfc2822Timestamp};
use vcon_document::{ExternalRecording, Vcon};

use crate::config::CliConfig;

/// Exit code for content that fails signature verification.
pub const EXIT_INVALID_SIGNATURE: u8 = 2;

/// Arguments for `vcon new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Telephone number of a party, with or without `tel:`. Repeatable.
    #[arg(long = "tel", value_name = "TEL", required = true)]
    pub tel: Vec<String>,

    /// Write the document here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for `vcon attach`.
#[derive(Args, Debug)]
pub struct AttachArgs {
    /// The vCon document to update in place.
    #[arg(value_name = "VCON")]
    pub vcon: PathBuf,

    /// File holding the exact bytes published at `--url`.
    #[arg(long, value_name = "FILE")]
    pub content: PathBuf,

    /// Where the content is published.
    #[arg(long)]
    pub url: String,

    /// Recording start, RFC 2822 (e.g. "Sat, 14 May 2022 18:16:19 -0000").
    #[arg(long, value_name = "RFC2822")]
    pub start: String,

    /// Recording length in seconds.
    #[arg(long, value_name = "SECS")]
    pub duration: f64,

    /// Index of a participating party. Repeatable.
    #[arg(long = "party", value_name = "I", required = true)]
    pub party: Vec<usize>,

    /// MIME type of the content (default from config).
    #[arg(long)]
    pub mimetype: Option<String>,

    /// File name recorded in the entry (default: the content file's name).
    #[arg(long)]
    pub filename: Option<String>,
}

/// Arguments for `vcon verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// The vCon document.
    #[arg(value_name = "VCON")]
    pub vcon: PathBuf,

    /// Index of the external dialog entry.
    #[arg(long)]
    pub index: usize,

    /// File holding the fetched content.
    #[arg(long, value_name = "FILE")]
    pub content: PathBuf,
}

/// Execute `vcon new`.
pub fn run_new(args: &NewArgs, config: &CliConfig) -> Result<u8> {
    let mut vcon = Vcon::new();
    for tel in &args.tel {
        vcon.set_party_tel_url(tel)
            .with_context(|| format!("invalid party telephone number: {tel}"))?;
    }
    tracing::info!(uuid = %vcon.uuid(), parties = vcon.parties().len(), "created vcon");
    write_vcon(&vcon, args.output.as_deref(), config.pretty)?;
    Ok(0)
}

/// Execute `vcon attach`.
pub fn run_attach(args: &AttachArgs, config: &CliConfig) -> Result<u8> {
    let mut vcon = read_vcon(&args.vcon)?;
    let content = std::fs::read(&args.content)
        .with_context(|| format!("failed to read content: {}", args.content.display()))?;
    let start: Rfc2822Timestamp = args
        .start
        .parse()
        .with_context(|| format!("invalid --start: {}", args.start))?;

    let parties = match args.party.as_slice() {
        [single] => PartyRef::Single(*single),
        many => PartyRef::Many(many.to_vec()),
    };
    let filename = match &args.filename {
        Some(name) => name.clone(),
        None => file_name(&args.content),
    };
    let recording = ExternalRecording {
        start,
        duration: args.duration,
        parties,
        url: args.url.clone(),
        mimetype: args
            .mimetype
            .clone()
            .unwrap_or_else(|| config.default_mimetype.clone()),
        filename,
    };

    let index = vcon
        .attach_external_recording(&content, recording, config.algorithm()?)
        .context("failed to attach external recording")?;
    write_vcon(&vcon, Some(&args.vcon), config.pretty)?;

    println!("OK: attached external recording as dialog entry {index}");
    Ok(0)
}

/// Execute `vcon verify`.
pub fn run_verify(args: &VerifyArgs, _config: &CliConfig) -> Result<u8> {
    let vcon = read_vcon(&args.vcon)?;
    let content = std::fs::read(&args.content)
        .with_context(|| format!("failed to read content: {}", args.content.display()))?;

    match vcon.verify_external(args.index, &content) {
        Ok(()) => {
            println!("OK: content matches dialog entry {}", args.index);
            Ok(0)
        }
        Err(e) if e.is_invalid_signature() => {
            println!("FAIL: {e}");
            Ok(EXIT_INVALID_SIGNATURE)
        }
        Err(e) => Err(e).with_context(|| format!("cannot verify dialog entry {}", args.index)),
    }
}

fn read_vcon(path: &Path) -> Result<Vcon> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read vcon: {}", path.display()))?;
    Vcon::loads(&text).with_context(|| format!("failed to load vcon: {}", path.display()))
}

fn write_vcon(vcon: &Vcon, path: Option<&Path>, pretty: bool) -> Result<()> {
    let text = if pretty {
        vcon.dumps_pretty()?
    } else {
        vcon.dumps()?
    };
    match path {
        Some(path) => std::fs::write(path, text + "\n")
            .with_context(|| format!("failed to write vcon: {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
