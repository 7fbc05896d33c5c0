//! Configuration loading for witr
//!
//! Defaults cover the built-in detectors and the 50% descriptor threshold.
//! A TOML file (`--config`) may override any part; built-in detector weights
//! and priorities missing from a user file keep their defaults. Unknown keys
//! are rejected.
//!
//! # Example TOML
//! ```toml
//! proc_root = "/proc"
//!
//! [source.weights]
//! cron = 0.6
//! shell = 0.5
//! supervisor = 0.7
//!
//! [source.shell]
//! commands = ["bash", "zsh", "sh", "fish"]
//! priority = 100
//!
//! [[source.detector]]
//! id = "supervisor"
//! source_type = "supervisor"
//! name = "supervisord"
//! commands = ["supervisord"]
//! priority = 150
//!
//! [file_context]
//! usage_threshold_percent = 50.0
//! ```

use crate::file_context::FileContextConfig;
use crate::source::SourceConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WitrConfig {
    /// procfs mount point
    pub proc_root: PathBuf,
    pub source: SourceConfig,
    pub file_context: FileContextConfig,
}

impl Default for WitrConfig {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            source: SourceConfig::default(),
            file_context: FileContextConfig::default(),
        }
    }
}

impl WitrConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, is not valid TOML, contains
    /// an out-of-range weight, or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("Failed to parse TOML config")?;
        config.source = config.source.with_defaults();
        config.validate().map_err(|e| anyhow!(e))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.source.validate()?;
        self.file_context.validate()
    }
}
