//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every key may be omitted;
//! missing keys take their defaults.
//!
//! ```yaml
//! ots_algorithm: LMOTS_SHA256_N32_W8
//! default_mimetype: audio/x-wav
//! pretty: true
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use vcon_core::mime::MIMETYPE_AUDIO_WAV;
use vcon_crypto::LmotsAlgorithm;

/// Settings shared by all subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// LM-OTS parameter set for new signatures, by full name or `w1`..`w8`.
    pub ots_algorithm: String,
    /// MIME type used by `attach` when `--mimetype` is not given.
    pub default_mimetype: String,
    /// Write documents as indented JSON.
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ots_algorithm: LmotsAlgorithm::default().as_str().to_string(),
            default_mimetype: MIMETYPE_AUDIO_WAV.to_string(),
            pretty: true,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or return defaults when no path was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    /// Parse YAML text. An empty document yields defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: CliConfig = serde_yaml::from_str(text).context("failed to parse YAML")?;
        config.algorithm()?;
        Ok(config)
    }

    /// The configured parameter set.
    pub fn algorithm(&self) -> Result<LmotsAlgorithm> {
        self.ots_algorithm
            .parse()
            .with_context(|| format!("unknown ots_algorithm \"{}\"", self.ots_algorithm))
    }
}
