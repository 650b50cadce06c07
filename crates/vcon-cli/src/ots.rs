//! # One-Time Signature Subcommand
//!
//! Raw LM-OTS signing and verification over a file's bytes, independent of
//! any vCon document. `sign` prints the base64url key and signature as
//! JSON; the private key is discarded before the command returns.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::config::CliConfig;
use crate::document::EXIT_INVALID_SIGNATURE;

/// Arguments for `vcon ots`.
#[derive(Args, Debug)]
pub struct OtsArgs {
    #[command(subcommand)]
    pub command: OtsCommand,
}

/// One-time signature subcommands.
#[derive(Subcommand, Debug)]
pub enum OtsCommand {
    /// Sign a file under a freshly generated one-time key.
    Sign {
        /// File to sign.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Verify a one-time signature over a file.
    Verify {
        /// File that was signed.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Base64url signature.
        #[arg(long)]
        signature: String,
        /// Base64url public key.
        #[arg(long)]
        key: String,
    },
}

#[derive(Debug, Serialize)]
struct SignOutput<'a> {
    algorithm: &'a str,
    key: String,
    signature: String,
}

/// Execute `vcon ots`.
pub fn run_ots(args: &OtsArgs, config: &CliConfig) -> Result<u8> {
    match &args.command {
        OtsCommand::Sign { file } => cmd_sign(file, config),
        OtsCommand::Verify {
            file,
            signature,
            key,
        } => cmd_verify(file, signature, key),
    }
}

fn cmd_sign(file: &Path, config: &CliConfig) -> Result<u8> {
    let message =
        std::fs::read(file).with_context(|| format!("failed to read file: {}", file.display()))?;
    let algorithm = config.algorithm()?;
    let signed = vcon_crypto::generate_and_sign_with(algorithm, &message)
        .with_context(|| format!("failed to sign {}", file.display()))?;

    let output = SignOutput {
        algorithm: algorithm.as_str(),
        key: signed.key,
        signature: signed.signature,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(0)
}

fn cmd_verify(file: &Path, signature: &str, key: &str) -> Result<u8> {
    let message =
        std::fs::read(file).with_context(|| format!("failed to read file: {}", file.display()))?;

    match vcon_crypto::verify(&message, signature.trim(), key.trim()) {
        Ok(()) => {
            println!("OK: signature is valid");
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e}");
            Ok(EXIT_INVALID_SIGNATURE)
        }
    }
}
