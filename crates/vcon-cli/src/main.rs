//! # vcon CLI entry point
//!
//! Parses command-line arguments, loads the optional config file, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vcon_cli::config::CliConfig;
use vcon_cli::document::{run_attach, run_new, run_verify, AttachArgs, NewArgs, VerifyArgs};
use vcon_cli::ots::{run_ots, OtsArgs};

/// vCon toolkit: conversation records with signed external recordings.
#[derive(Parser, Debug)]
#[command(name = "vcon", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new vCon document.
    New(NewArgs),

    /// Attach an externally stored recording, signed with a one-time key.
    Attach(AttachArgs),

    /// Verify fetched content against an external dialog entry.
    Verify(VerifyArgs),

    /// Raw LM-OTS signing and verification.
    Ots(OtsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    tracing::debug!(?config, "vcon CLI starting");

    let result = match cli.command {
        Commands::New(args) => run_new(&args, &config),
        Commands::Attach(args) => run_attach(&args, &config),
        Commands::Verify(args) => run_verify(&args, &config),
        Commands::Ots(args) => run_ots(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
